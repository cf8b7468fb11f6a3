//! Security-analysis prompt template.

/// Builds the analysis prompt seeded with the caller's query description
/// and the formatted asset report.
///
/// Pure string template: both inputs are interpolated verbatim, with no
/// validation or truncation.
#[must_use]
pub fn analysis_prompt(query_params: &str, assets_data: &str) -> String {
    format!(
        "You are a senior network security analyst. Based on the following query \
         parameters: {query_params}\n\
         and the discovered asset information:\n{assets_data}\n\n\
         Analyze the potential security risks and provide:\n\
         1. Asset exposure analysis\n\
         2. Potential vulnerability assessment\n\
         3. Hardening recommendations"
    )
}
