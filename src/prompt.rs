use serde::{Deserialize, Serialize};

/// One search submission from the form. `query` is the only required field;
/// the filters are advisory context folded into the prompt text.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub age_group: AgeGroup,
    #[serde(default)]
    pub price_range: PriceRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    #[default]
    All,
    Infant,
    Toddler,
    Preschool,
    SchoolAge,
}

impl AgeGroup {
    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::All => "All Ages",
            AgeGroup::Infant => "Infants (0-12 months)",
            AgeGroup::Toddler => "Toddlers (1-3 years)",
            AgeGroup::Preschool => "Preschool (3-5 years)",
            AgeGroup::SchoolAge => "School Age (5+ years)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PriceRange {
    #[default]
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "under_200")]
    Under200,
    #[serde(rename = "200_300")]
    From200To300,
    #[serde(rename = "300_400")]
    From300To400,
    #[serde(rename = "over_400")]
    Over400,
}

impl PriceRange {
    pub fn label(&self) -> &'static str {
        match self {
            PriceRange::Any => "Any",
            PriceRange::Under200 => "Under $200/week",
            PriceRange::From200To300 => "$200-$300/week",
            PriceRange::From300To400 => "$300-$400/week",
            PriceRange::Over400 => "Over $400/week",
        }
    }
}

/// Compose the single prompt string sent to the model. Pure string assembly:
/// fixed location context, optional filter lines, then the question verbatim.
pub fn build_prompt(request: &SearchRequest) -> String {
    let mut context = String::from("Location: Nashville, TN");

    let area = request.area.trim();
    if !area.is_empty() {
        context.push_str(&format!(", specifically {area}"));
    }
    if request.age_group != AgeGroup::All {
        context.push_str(&format!("\nAge Group: {}", request.age_group.label()));
    }
    if request.price_range != PriceRange::Any {
        context.push_str(&format!("\nPrice Range: {}", request.price_range.label()));
    }

    format!("{}\n\nUser Question: {}", context, request.query)
}
