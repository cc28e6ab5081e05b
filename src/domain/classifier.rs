// Satellite classification - ordered rule table over name and catalog id
use serde::Serialize;

/// Category tag served to API consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "ISS")]
    Iss,
    #[serde(rename = "GPS")]
    Gps,
    Weather,
    Communication,
    Scientific,
    Military,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Iss,
        Category::Gps,
        Category::Weather,
        Category::Communication,
        Category::Scientific,
        Category::Military,
        Category::Other,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Iss => "International Space Station",
            Category::Gps => "GPS Constellation",
            Category::Weather => "Weather Satellites",
            Category::Communication => "Communication Satellites",
            Category::Scientific => "Scientific Satellites",
            Category::Military => "Military Satellites",
            Category::Other => "Other Satellites",
        }
    }

    /// Stable display color, used by globe frontends to tint markers.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Iss => "#FF6B6B",
            Category::Gps => "#4ECDC4",
            Category::Weather => "#45B7D1",
            Category::Communication => "#96CEB4",
            Category::Scientific => "#FFEAA7",
            Category::Military => "#DDA0DD",
            Category::Other => "#A8A8A8",
        }
    }
}

struct Rule {
    category: Category,
    catalog_ids: &'static [u64],
    name_tokens: &'static [&'static str],
}

/// Evaluated top-down; the first matching rule wins. Tokens are matched
/// case-insensitively against the object name.
const RULES: &[Rule] = &[
    Rule {
        category: Category::Iss,
        catalog_ids: &[25544],
        name_tokens: &["iss (", "zarya"],
    },
    Rule {
        category: Category::Gps,
        catalog_ids: &[],
        name_tokens: &["gps", "navstar"],
    },
    Rule {
        category: Category::Weather,
        catalog_ids: &[],
        name_tokens: &["noaa", "goes", "meteosat", "metop", "himawari", "fengyun", "weather"],
    },
    Rule {
        category: Category::Communication,
        catalog_ids: &[],
        name_tokens: &[
            "starlink", "oneweb", "iridium", "intelsat", "eutelsat", "orbcomm",
            "globalstar", "telecom", "telstar", "communication",
        ],
    },
    Rule {
        category: Category::Scientific,
        catalog_ids: &[],
        name_tokens: &[
            "hubble", "hst", "telescope", "observatory", "explorer", "science",
            "research", "tess", "kepler",
        ],
    },
    Rule {
        category: Category::Military,
        catalog_ids: &[],
        name_tokens: &["usa ", "nrol", "dscs", "milstar", "sbirs", "lacrosse"],
    },
];

/// Classify an object from its name and catalog id. Total and
/// deterministic: every input maps to exactly one category.
pub fn classify(name: &str, catalog_id: u64) -> Category {
    let name_lower = name.to_lowercase();
    for rule in RULES {
        if rule.catalog_ids.contains(&catalog_id)
            || rule.name_tokens.iter().any(|t| name_lower.contains(t))
        {
            return rule.category;
        }
    }
    Category::Other
}
