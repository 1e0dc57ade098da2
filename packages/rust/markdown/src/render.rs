//! Summary rendering.
//!
//! Produces the block appended to (or replacing the tail of) the quote
//! document. Output always starts with `---` and a blank line and never ends
//! with a newline, so re-inserting it is byte-stable.

use stima_shared::money::{format_euro, format_rate, round_half_away};
use stima_shared::{Aggregate, Phase, RateConfig, RenderMode};

const PRICE_DISCLAIMER: &str = "I costi indicati non includono eventuali spese esterne \
(licenze software, hosting, domini, servizi di terze parti), che verranno quantificate a parte.";

const TIMELINE_DISCLAIMER: &str = "La timeline è indicativa e può variare in base alla \
tempestività dei feedback e alla disponibilità dei materiali necessari.";

const PAYMENT_TERMS: &str = "Acconto del 50% all'accettazione del preventivo e saldo alla \
consegna, oppure pagamento a milestone al completamento di ciascuna fase.";

const FINAL_NOTES: &str = "Le stime si basano sulle specifiche fornite e potranno variare \
in caso di modifiche ai requisiti o di richieste aggiuntive emerse durante lo sviluppo.";

/// Render the summary block for `phases`.
///
/// `phases` is expected to be the list `aggregate` was computed from.
pub fn render_summary(
    phases: &[Phase],
    aggregate: &Aggregate,
    rates: &RateConfig,
    mode: RenderMode,
) -> String {
    let mut lines: Vec<String> = vec!["---".into(), String::new()];

    match mode {
        RenderMode::Range => push_range(&mut lines, phases, aggregate, rates),
        RenderMode::Final => push_final(&mut lines, phases, aggregate),
    }

    push_section(&mut lines, "Modalità di pagamento");
    lines.push(PAYMENT_TERMS.into());
    lines.push(String::new());

    push_section(&mut lines, "Considerazioni finali");
    lines.push(FINAL_NOTES.into());

    lines.join("\n")
}

fn push_range(
    lines: &mut Vec<String>,
    phases: &[Phase],
    aggregate: &Aggregate,
    rates: &RateConfig,
) {
    push_section(lines, "Riepilogo stime");
    lines.push("| Fase | Ore Min | Ore Max |".into());
    lines.push("| :--- | :---: | :---: |".into());
    for phase in phases {
        lines.push(format!(
            "| {} | {} | {} |",
            table_cell(&phase.name),
            phase.min_hours,
            phase.max_hours
        ));
    }
    lines.push(format!(
        "| **TOTALE** | **{}** | **{}** |",
        aggregate.total_hours_min, aggregate.total_hours_max
    ));
    lines.push(String::new());

    push_section(lines, "Stima economica");
    lines.push(format!(
        "**Range di prezzo: {} - {}**",
        format_euro(aggregate.price_min),
        format_euro(aggregate.price_max)
    ));
    lines.push(String::new());
    lines.push(format!(
        "Calcolato su una tariffa oraria tra {} e {}. {PRICE_DISCLAIMER}",
        format_rate(rates.min_hourly_rate),
        format_rate(rates.max_hourly_rate)
    ));
    lines.push(String::new());

    push_section(lines, "Timeline stimata");
    lines.push(format!(
        "**{}-{} settimane** per il completamento.",
        aggregate.weeks_min, aggregate.weeks_max
    ));
    lines.push(String::new());
    lines.push(TIMELINE_DISCLAIMER.into());
    lines.push(String::new());
}

fn push_final(lines: &mut Vec<String>, phases: &[Phase], aggregate: &Aggregate) {
    let quote = aggregate.final_quote();

    push_section(lines, "Preventivo finale");
    lines.push("| Fase | Ore |".into());
    lines.push("| :--- | :---: |".into());
    for phase in phases {
        lines.push(format!(
            "| {} | {} |",
            table_cell(&phase.name),
            average_hours(phase)
        ));
    }
    lines.push(format!("| **TOTALE** | **{}** |", quote.total_hours));
    lines.push(String::new());

    push_section(lines, "Costo del progetto");
    lines.push(format!("**Prezzo finale: {}**", format_euro(quote.price)));
    lines.push(String::new());

    push_section(lines, "Timeline");
    lines.push(format!("**{} settimane** per il completamento.", quote.weeks));
    lines.push(String::new());
}

/// `round((min + max) / 2)`, halves away from zero.
fn average_hours(phase: &Phase) -> i64 {
    round_half_away((f64::from(phase.min_hours) + f64::from(phase.max_hours)) / 2.0)
}

/// Phase names may contain `|`, which would split the table row.
fn table_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn push_section(lines: &mut Vec<String>, title: &str) {
    lines.push(format!("### {title}"));
    lines.push(String::new());
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn two_phases() -> (Vec<Phase>, Aggregate) {
        let phases = vec![Phase::new("Design", 10, 15), Phase::new("Build", 20, 25)];
        let aggregate = Aggregate {
            total_hours_min: 30,
            total_hours_max: 40,
            price_min: 1020,
            price_max: 1440,
            weeks_min: 2,
            weeks_max: 3,
        };
        (phases, aggregate)
    }

    /// Read `(name, cells)` back out of the first table in a summary.
    fn table_rows(summary: &str) -> Vec<(String, Vec<String>)> {
        summary
            .lines()
            .filter(|l| l.starts_with("| ") && !l.starts_with("| :---") && !l.starts_with("| Fase"))
            .map(|l| {
                let mut cells = split_row(l).into_iter();
                let name = cells.next().unwrap_or_default();
                (name, cells.collect())
            })
            .collect()
    }

    /// Cells of a table row, honoring `\|` escapes.
    fn split_row(row: &str) -> Vec<String> {
        let mut cells = Vec::new();
        let mut cell = String::new();
        let mut chars = row.trim().chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' if chars.peek() == Some(&'|') => {
                    chars.next();
                    cell.push('|');
                }
                '|' => cells.push(std::mem::take(&mut cell)),
                _ => cell.push(c),
            }
        }
        // The leading pipe leaves an empty first cell.
        cells
            .into_iter()
            .skip(1)
            .map(|c| c.trim().trim_matches('*').to_string())
            .collect()
    }

    #[test]
    fn range_mode_full_output() {
        let (phases, aggregate) = two_phases();
        let summary = render_summary(&phases, &aggregate, &RateConfig::default(), RenderMode::Range);

        let expected = format!(
            "---

### Riepilogo stime

| Fase | Ore Min | Ore Max |
| :--- | :---: | :---: |
| Design | 10 | 15 |
| Build | 20 | 25 |
| **TOTALE** | **30** | **40** |

### Stima economica

**Range di prezzo: €1.020 - €1.440**

Calcolato su una tariffa oraria tra €34 e €36. {PRICE_DISCLAIMER}

### Timeline stimata

**2-3 settimane** per il completamento.

{TIMELINE_DISCLAIMER}

### Modalità di pagamento

{PAYMENT_TERMS}

### Considerazioni finali

{FINAL_NOTES}"
        );
        assert_eq!(summary, expected);
    }

    #[test]
    fn final_mode_full_output() {
        let (phases, aggregate) = two_phases();
        let summary = render_summary(&phases, &aggregate, &RateConfig::default(), RenderMode::Final);

        let expected = format!(
            "---

### Preventivo finale

| Fase | Ore |
| :--- | :---: |
| Design | 13 |
| Build | 23 |
| **TOTALE** | **35** |

### Costo del progetto

**Prezzo finale: €1.230**

### Timeline

**3 settimane** per il completamento.

### Modalità di pagamento

{PAYMENT_TERMS}

### Considerazioni finali

{FINAL_NOTES}"
        );
        assert_eq!(summary, expected);
    }

    #[test]
    fn single_value_phase_rows() {
        let phases = vec![Phase::single("Setup", 5)];
        let aggregate = Aggregate {
            total_hours_min: 5,
            total_hours_max: 5,
            price_min: 170,
            price_max: 180,
            weeks_min: 0,
            weeks_max: 0,
        };
        let rates = RateConfig::default();

        let range = render_summary(&phases, &aggregate, &rates, RenderMode::Range);
        assert!(range.contains("| Setup | 5 | 5 |"));
        assert!(range.contains("**0-0 settimane**"));

        let final_quote = render_summary(&phases, &aggregate, &rates, RenderMode::Final);
        assert!(final_quote.contains("| Setup | 5 |"));
        assert!(final_quote.contains("**Prezzo finale: €175**"));
    }

    #[test]
    fn table_reproduces_phase_hours() {
        let phases = vec![
            Phase::new("Analisi", 4, 6),
            Phase::single("Setup", 5),
            Phase::new("Sviluppo backend", 40, 60),
            Phase::new("Analisi", 1, 2),
        ];
        let aggregate = Aggregate {
            total_hours_min: 50,
            total_hours_max: 73,
            price_min: 1700,
            price_max: 2630,
            weeks_min: 3,
            weeks_max: 6,
        };
        let summary = render_summary(&phases, &aggregate, &RateConfig::default(), RenderMode::Range);

        let rows = table_rows(&summary);
        let (total, body) = rows.split_last().expect("total row");
        assert_eq!(total.0, "TOTALE");
        assert_eq!(total.1, ["50", "73"]);

        let reread: Vec<Phase> = body
            .iter()
            .map(|(name, cells)| {
                Phase::new(
                    name.as_str(),
                    cells[0].parse().expect("min"),
                    cells[1].parse().expect("max"),
                )
            })
            .collect();
        assert_eq!(reread, phases);
    }

    #[test]
    fn framing_is_stable() {
        let (phases, aggregate) = two_phases();
        for mode in [RenderMode::Range, RenderMode::Final] {
            let summary = render_summary(&phases, &aggregate, &RateConfig::default(), mode);
            assert!(summary.starts_with("---\n\n### "));
            assert!(!summary.ends_with('\n'));
        }
    }

    #[test]
    fn fractional_rates_in_price_note() {
        let (phases, aggregate) = two_phases();
        let rates = RateConfig {
            min_hourly_rate: 32.5,
            ..RateConfig::default()
        };
        let summary = render_summary(&phases, &aggregate, &rates, RenderMode::Range);
        assert!(summary.contains("tra €32,50 e €36."));
    }

    #[test]
    fn pipes_in_phase_names_are_escaped() {
        let phases = vec![Phase::new("Frontend | Backend", 4, 6)];
        let aggregate = Aggregate {
            total_hours_min: 4,
            total_hours_max: 6,
            price_min: 135,
            price_max: 215,
            weeks_min: 0,
            weeks_max: 1,
        };

        let range = render_summary(&phases, &aggregate, &RateConfig::default(), RenderMode::Range);
        assert!(range.contains("| Frontend \\| Backend | 4 | 6 |"));
        let rows = table_rows(&range);
        assert_eq!(rows[0].0, "Frontend | Backend");
        assert_eq!(rows[0].1, ["4", "6"]);

        let last = render_summary(&phases, &aggregate, &RateConfig::default(), RenderMode::Final);
        assert!(last.contains("| Frontend \\| Backend | 5 |"));
        let rows = table_rows(&last);
        assert_eq!(rows[0].0, "Frontend | Backend");
        assert_eq!(rows[0].1, ["5"]);
    }
}
