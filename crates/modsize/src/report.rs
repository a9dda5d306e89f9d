//! Report rendering: ratio formatting and the Mermaid pie chart.
//!
//! The chart grammar is fixed:
//!
//! ```text
//! pie showData title Modules size (Total LOC: 1028)
//!     "pl.tfij.orders" : 177
//!     "undefined" : 10
//! ```
//!
//! One data line per module with at least one file, sorted by module name,
//! four-space indent, no trailing newline.

use std::fmt::Write as _;

use crate::summary::ModuleSummary;

/// Render a ratio with at most four decimal digits.
///
/// Uses `.` as the separator, no digit grouping, and drops trailing zeros:
/// `0.42898` becomes `0.429`, `0.2` stays `0.2`, `1.0` becomes `1`.
pub fn format_ratio(value: f64) -> String {
    let fixed = format!("{value:.4}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Build the Mermaid pie chart for the given module summaries.
///
/// `total` is printed in the header; data lines are sorted by module name.
pub fn mermaid_pie_chart<'a, I>(summaries: I, total: usize) -> String
where
    I: IntoIterator<Item = &'a ModuleSummary>,
{
    let mut sorted: Vec<&ModuleSummary> = summaries.into_iter().collect();
    sorted.sort_by(|a, b| a.module().name().cmp(b.module().name()));

    let mut chart = format!("pie showData title Modules size (Total LOC: {total})");
    for summary in sorted {
        // Writing to a String cannot fail.
        let _ = write!(
            chart,
            "\n    \"{}\" : {}",
            summary.module().name(),
            summary.lines_of_code()
        );
    }
    chart
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::Module;

    #[test]
    fn ratio_is_rounded_to_four_digits() {
        assert_eq!(format_ratio(441.0 / 1028.0), "0.429");
        assert_eq!(format_ratio(0.123_456), "0.1235");
    }

    #[test]
    fn ratio_trailing_zeros_are_trimmed() {
        assert_eq!(format_ratio(0.2), "0.2");
        assert_eq!(format_ratio(0.5), "0.5");
        assert_eq!(format_ratio(1.0), "1");
    }

    #[test]
    fn ratio_out_of_range_values_still_render() {
        assert_eq!(format_ratio(0.0), "0");
        assert_eq!(format_ratio(-0.5), "-0.5");
        assert_eq!(format_ratio(1.5), "1.5");
        assert_eq!(format_ratio(0.000_01), "0");
    }

    #[test]
    fn chart_lines_are_sorted_by_name() {
        let summaries = [
            ModuleSummary::new(Module::Undefined, 2, 10, 60),
            ModuleSummary::new(Module::package("b.orders"), 1, 30, 60),
            ModuleSummary::new(Module::package("a.users"), 3, 20, 60),
        ];

        let chart = mermaid_pie_chart(&summaries, 60);

        assert_eq!(
            chart,
            "pie showData title Modules size (Total LOC: 60)\n    \"a.users\" : 20\n    \"b.orders\" : 30\n    \"undefined\" : 10"
        );
    }

    #[test]
    fn chart_without_modules_is_only_the_header() {
        let chart = mermaid_pie_chart(std::iter::empty(), 0);
        assert_eq!(chart, "pie showData title Modules size (Total LOC: 0)");
    }
}
