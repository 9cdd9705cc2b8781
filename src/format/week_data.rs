// CLDR weekData: regions whose week does not start on Monday.
const SUNDAY_REGIONS: &[&str] = &[
    "AG", "AS", "BD", "BR", "BS", "BT", "BW", "BZ", "CA", "CN", "CO", "DM", "DO", "ET", "GT",
    "GU", "HK", "HN", "ID", "IL", "IN", "JM", "JP", "KE", "KH", "KR", "LA", "MH", "MM", "MO",
    "MT", "MX", "MZ", "NI", "NP", "PA", "PE", "PH", "PK", "PR", "PT", "PY", "SA", "SG", "SV",
    "TH", "TT", "TW", "UM", "US", "VE", "VI", "WS", "YE", "ZA", "ZW",
];

const SATURDAY_REGIONS: &[&str] = &[
    "AE", "AF", "BH", "DJ", "DZ", "EG", "IQ", "IR", "JO", "KW", "LY", "OM", "QA", "SD", "SY",
];

const FRIDAY_REGIONS: &[&str] = &["MV"];

// Region assumed for a bare language tag.
const LIKELY_REGIONS: &[(&str, &str)] = &[
    ("ar", "EG"),
    ("en", "US"),
    ("fa", "IR"),
    ("he", "IL"),
    ("hi", "IN"),
    ("id", "ID"),
    ("ja", "JP"),
    ("ko", "KR"),
    ("pt", "BR"),
    ("th", "TH"),
    ("zh", "CN"),
];

/// First day of the week for a BCP 47 tag such as `en-US` or `de_DE`.
/// 0 = Sunday … 6 = Saturday; unknown regions start on Monday.
pub fn first_day_of_week_for_locale(locale: &str) -> u8 {
    let mut parts = locale.split(['-', '_']);
    let language = parts.next().unwrap_or_default().to_ascii_lowercase();
    let region = parts
        .find(|part| part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()))
        .map(|part| part.to_ascii_uppercase())
        .or_else(|| {
            LIKELY_REGIONS
                .iter()
                .find(|(lang, _)| *lang == language)
                .map(|(_, region)| region.to_string())
        });

    let Some(region) = region else {
        return 1;
    };
    let region = region.as_str();
    if SUNDAY_REGIONS.contains(&region) {
        0
    } else if SATURDAY_REGIONS.contains(&region) {
        6
    } else if FRIDAY_REGIONS.contains(&region) {
        5
    } else {
        1
    }
}
