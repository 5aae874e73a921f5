use crate::display::{cell, ModuleView};
use anyhow::Result;
use serde_json::Value;
use std::io::Write;

/// Write the listed rows as CSV using the same columns as the table view.
pub fn write_csv<W: Write>(out: &mut W, view: &ModuleView, rows: &[Value]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    writer.write_record(view.columns.iter().map(|column| column.header))?;
    for row in rows {
        let record: Vec<String> = view
            .columns
            .iter()
            .map(|column| cell(row, column.field))
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::view_for;
    use qhse_types::Module;
    use serde_json::json;

    #[test]
    fn csv_has_header_and_one_line_per_row() {
        let view = view_for(Module::Incidents);
        let rows = vec![
            json!({"numeroIncident": "INC-2025-0001", "titre": "Chute", "statut": "Déclaré"}),
            json!({"numeroIncident": "INC-2025-0002", "titre": "Coupure", "statut": "Clôturé"}),
        ];

        let mut buffer = Vec::new();
        write_csv(&mut buffer, view, &rows).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3, "header plus two data rows");
        assert!(lines[0].contains("Numéro"), "header row uses labels");
        assert!(lines[1].contains("INC-2025-0001"));
    }

    #[test]
    fn csv_quotes_fields_with_commas() {
        let view = view_for(Module::Incidents);
        let rows = vec![json!({"numeroIncident": "INC-2025-0003", "titre": "Chute, échelle"})];

        let mut buffer = Vec::new();
        write_csv(&mut buffer, view, &rows).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(
            text.contains("\"Chute, échelle\""),
            "embedded comma must be quoted: {}",
            text
        );
    }
}
