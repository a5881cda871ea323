//! The fixed tag taxonomies articles are classified into.
//!
//! Both lists are closed: the classifier prompt enumerates them and the
//! normalization pass warns on anything outside them. Editing these tables
//! changes the prompt on the next run, nothing else needs to move.

/// Primary tags. Every classified article carries exactly one.
pub const PRIMARY_TAGS: [&str; 10] = [
    "Global Affairs & Politics",
    "Economy & Macro",
    "Finance & Investing",
    "Technology",
    "Defense & Security",
    "Science & Environment",
    "Health & Society",
    "Entertainment & Culture",
    "Sports",
    "Crime & Law",
];

/// Secondary tags, grouped for prompt readability. Articles carry up to two.
pub const SECONDARY_TAG_GROUPS: [(&str, &[&str]); 8] = [
    (
        "Politics & Society",
        &[
            "Geopolitics",
            "International Relations",
            "United Nations",
            "NATO",
            "G7/G20 Summits",
            "Elections",
            "Legislation",
            "Executive Orders",
            "Supreme Court",
            "Lobbying",
            "Human Rights",
            "Immigration",
            "Refugees",
            "Border Security",
            "Civil Unrest",
            "Protests",
            "Terrorism",
            "Diplomacy",
            "Sanctions",
            "Trade Agreements",
            "Espionage",
            "Urban Planning",
            "Smart Cities",
            "Public Infrastructure",
            "Education Policy",
            "Student Loans",
        ],
    ),
    (
        "Economics",
        &[
            "Federal Reserve",
            "Central Banks",
            "Monetary Policy",
            "Interest Rates",
            "Inflation",
            "CPI/PPI",
            "GDP Growth",
            "Recession Risk",
            "Labor Market",
            "Unemployment",
            "Strikes/Unions",
            "Supply Chain",
            "Manufacturing",
            "Trade Deficit",
            "Consumer Confidence",
            "Retail Sales",
            "Housing Market",
            "Mortgages",
        ],
    ),
    (
        "Finance",
        &[
            "Stock Market",
            "S&P 500",
            "Nasdaq",
            "Earnings Reports",
            "IPOs",
            "Mergers & Acquisitions",
            "Venture Capital",
            "Startups",
            "Cryptocurrency",
            "Bitcoin",
            "Ethereum",
            "DeFi",
            "Stablecoins",
            "Blockchain Regulation",
            "Commodities",
            "Oil & Gas",
            "Gold & Metals",
            "Personal Finance",
            "Retirement Planning",
            "Family Office",
        ],
    ),
    (
        "Technology",
        &[
            "Artificial Intelligence",
            "Generative AI",
            "LLMs",
            "Machine Learning",
            "Neural Networks",
            "AI Ethics",
            "AI Regulation",
            "Cybersecurity",
            "Hacking",
            "Ransomware",
            "Data Privacy",
            "Antitrust",
            "Big Tech (FAANG)",
            "Semiconductors",
            "Chip Manufacturing",
            "Quantum Computing",
            "Cloud Computing",
            "SaaS",
            "Enterprise Software",
            "Data Centers",
            "Consumer Electronics",
            "Smartphones",
            "Wearables",
            "AR/VR/XR",
            "5G/6G Networks",
            "Open Source",
        ],
    ),
    (
        "Defense",
        &[
            "Military Strategy",
            "Defense Spending",
            "Arms Deals",
            "Weapons Systems",
            "AI Defense Tech",
            "Autonomous Weapons",
            "Drone Warfare",
            "Unmanned Systems",
            "Nuclear Proliferation",
            "Ballistic Missiles",
            "Arms Control",
            "Intelligence Community",
            "Surveillance",
            "Counterterrorism",
            "Special Operations",
            "Space Force",
            "Satellite Warfare",
            "Hypersonics",
        ],
    ),
    (
        "Science",
        &[
            "Climate Change",
            "Carbon Emissions",
            "Extreme Weather",
            "Renewable Energy",
            "Solar Power",
            "Wind Power",
            "Nuclear Fusion",
            "Electric Vehicles (EVs)",
            "Battery Tech",
            "Space Exploration",
            "NASA",
            "SpaceX",
            "Mars Missions",
            "Astronomy",
            "Biotech",
            "Genetics",
            "CRISPR",
            "Pharmaceuticals",
            "Medical Devices",
            "Materials Science",
            "Superconductors",
        ],
    ),
    (
        "Culture & Sports",
        &[
            "Streaming Services",
            "Box Office",
            "Hollywood",
            "Music Industry",
            "PC Gaming",
            "Console Gaming",
            "Esports",
            "Game Development",
            "Social Media Trends",
            "Influencer Culture",
            "Art & Design",
            "NFL",
            "NBA",
            "MLB",
            "NHL",
            "FIFA/Soccer",
            "Premier League",
            "F1/Motorsport",
            "Sports Betting",
            "NCAA/College Sports",
            "NIL deals",
            "Recruitment",
            "Injuries",
        ],
    ),
    (
        "Law",
        &[
            "Violent Crime",
            "Mass Shootings",
            "Gun Control",
            "White Collar Crime",
            "Fraud",
            "Money Laundering",
            "Law Enforcement",
            "Criminal Justice Reform",
            "Drug Trafficking",
            "Opioid Crisis",
            "Healthcare Insurance",
            "Medicare/Medicaid",
        ],
    ),
];

/// Check whether a tag is in the primary taxonomy.
pub fn is_primary_tag(tag: &str) -> bool {
    PRIMARY_TAGS.contains(&tag)
}

/// Check whether a tag is in any secondary group.
pub fn is_secondary_tag(tag: &str) -> bool {
    SECONDARY_TAG_GROUPS
        .iter()
        .any(|(_, tags)| tags.contains(&tag))
}

/// Primary tags as a comma-separated prompt line.
pub fn primary_tag_list() -> String {
    PRIMARY_TAGS.join(", ")
}

/// Secondary tags as grouped bullet lines for the prompt.
pub fn secondary_tag_listing() -> String {
    SECONDARY_TAG_GROUPS
        .iter()
        .map(|(group, tags)| format!("- **{}:** {}.", group, tags.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}
