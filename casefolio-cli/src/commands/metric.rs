use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use casefolio_catalog::metric_parser::parse_metric_with_pattern;

pub(crate) fn run_metric(inputs: &[String]) {
    for text in inputs {
        match parse_metric_with_pattern(text) {
            Some((pattern, m)) => {
                log::info!(
                    "  {:<24} {} value={} suffix={:?} decimals={} [{:?}]",
                    format!("{text:?}"),
                    "\u{2192}".if_supports_color(Stdout, |t| t.dimmed()),
                    format!("{:.*}", m.decimal_precision as usize, m.value)
                        .if_supports_color(Stdout, |t| t.green()),
                    m.unit_suffix,
                    m.decimal_precision,
                    pattern,
                );
            }
            None => {
                log::info!(
                    "  {:<24} {} {}",
                    format!("{text:?}"),
                    "\u{2192}".if_supports_color(Stdout, |t| t.dimmed()),
                    "no match".if_supports_color(Stdout, |t| t.yellow()),
                );
            }
        }
    }
}
