use crate::cli::ReportFormat;
use crate::error::{CliError, Result};
use pocketscan::engine::descriptors::DescriptorRecord;
use pocketscan::workflows::analyze::{LigandReport, PocketOutcome, ProteinReport};
use serde::Serialize;
use std::io::Write;

const BANNER_WIDTH: usize = 60;

/// Writes `reports` in the chosen format.
///
/// JSON output is always an array, one element per protein, so that the
/// shape does not depend on how many identifiers were given.
pub fn write_reports(
    reports: &[ProteinReport],
    format: ReportFormat,
    writer: &mut impl Write,
) -> Result<()> {
    match format {
        ReportFormat::Text => {
            for report in reports {
                write_text(report, writer)?;
            }
        }
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, reports)
                .map_err(|e| CliError::Report(e.to_string()))?;
            writeln!(writer)?;
        }
        ReportFormat::Csv => write_csv(reports, writer)?,
    }
    writer.flush()?;
    Ok(())
}

fn write_text(report: &ProteinReport, w: &mut impl Write) -> Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(w, "\n{rule}")?;
    writeln!(
        w,
        " PROTEIN: {} | TOTAL POCKETS FOUND: {}",
        report.protein_id, report.pocket_count
    )?;
    writeln!(w, "{rule}")?;

    for (i, pocket) in report.pockets.iter().enumerate() {
        writeln!(w, "\n----------------[ POCKET {} ]----------------", i + 1)?;
        write_ligand_info(pocket, w)?;
        match &pocket.outcome {
            PocketOutcome::Bound {
                descriptors,
                bond_count,
            } => write_descriptors(descriptors, *bond_count, w)?,
            PocketOutcome::Unbound => writeln!(w, "[ Ligand not bound to the protein ]")?,
            PocketOutcome::Invalid { reason } => {
                writeln!(w, "[ Ligand skipped: {reason} ]")?
            }
        }
    }
    writeln!(w)?;
    Ok(())
}

fn write_ligand_info(pocket: &LigandReport, w: &mut impl Write) -> Result<()> {
    let ligand = &pocket.ligand;
    let residue = match ligand.residue_number {
        Some(num) => format!("{} {}/{}", ligand.residue_name, ligand.chain_id, num),
        None => format!("{} {}/?", ligand.residue_name, ligand.chain_id),
    };
    writeln!(w, "[ Ligand Info ]")?;
    writeln!(w, "    • Name: {}", ligand.name)?;
    writeln!(w, "    • Residue: {residue}")?;
    writeln!(w, "    • Formula: {}", ligand.formula)?;
    writeln!(
        w,
        "    • Formula's weight: {}",
        fmt_opt(ligand.formula_weight)
    )?;
    writeln!(w)?;
    Ok(())
}

fn write_descriptors(
    d: &DescriptorRecord,
    bond_count: Option<usize>,
    w: &mut impl Write,
) -> Result<()> {
    writeln!(w, "[ Pocket Descriptors ]")?;
    writeln!(w, "    • Atom count: {}", d.atom_count)?;
    writeln!(w, "    • Hydrophobicity: {}", fmt_opt(d.hydrophobic_perc))?;
    writeln!(w, "    • Number of aromatic rings: {}", d.aromatic_count)?;
    writeln!(w, "    • Solvent accessible surface area: {:.2}", d.sasa)?;
    writeln!(w, "    • Gyration radius: {:.2}", d.gyration_radius)?;
    if let Some(bonds) = bond_count {
        writeln!(w, "    • Inferred bonds: {bonds}")?;
    }
    Ok(())
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

/// One CSV line per ligand instance. `None` fields become empty cells.
#[derive(Serialize)]
struct CsvRow<'a> {
    protein_id: &'a str,
    pocket: usize,
    status: &'static str,
    ligand_name: &'a str,
    formula: &'a str,
    formula_weight: Option<f64>,
    chain_id: &'a str,
    residue_number: Option<isize>,
    residue_name: &'a str,
    atom_count: Option<usize>,
    hydrophobic_perc: Option<f64>,
    aromatic_count: Option<usize>,
    sasa: Option<f64>,
    gyration_radius: Option<f64>,
    unique_residue_count: Option<usize>,
    polar_count: Option<usize>,
    nonpolar_count: Option<usize>,
    bond_count: Option<usize>,
    reason: Option<&'a str>,
}

impl<'a> CsvRow<'a> {
    fn new(protein_id: &'a str, index: usize, pocket: &'a LigandReport) -> Self {
        let ligand = &pocket.ligand;
        let d = pocket.outcome.descriptors();
        let (status, bond_count, reason) = match &pocket.outcome {
            PocketOutcome::Bound { bond_count, .. } => ("bound", *bond_count, None),
            PocketOutcome::Unbound => ("unbound", None, None),
            PocketOutcome::Invalid { reason } => ("invalid", None, Some(reason.as_str())),
        };
        Self {
            protein_id,
            pocket: index + 1,
            status,
            ligand_name: &ligand.name,
            formula: &ligand.formula,
            formula_weight: ligand.formula_weight,
            chain_id: &ligand.chain_id,
            residue_number: ligand.residue_number,
            residue_name: &ligand.residue_name,
            atom_count: d.map(|d| d.atom_count),
            hydrophobic_perc: d.and_then(|d| d.hydrophobic_perc),
            aromatic_count: d.map(|d| d.aromatic_count),
            sasa: d.map(|d| d.sasa),
            gyration_radius: d.map(|d| d.gyration_radius),
            unique_residue_count: d.map(|d| d.unique_residue_count),
            polar_count: d.map(|d| d.polar_count),
            nonpolar_count: d.map(|d| d.nonpolar_count),
            bond_count,
            reason,
        }
    }
}

fn write_csv(reports: &[ProteinReport], writer: &mut impl Write) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for report in reports {
        for (i, pocket) in report.pockets.iter().enumerate() {
            csv_writer
                .serialize(CsvRow::new(&report.protein_id, i, pocket))
                .map_err(|e| CliError::Report(e.to_string()))?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocketscan::core::models::ligand::LigandMetadata;

    fn heme() -> LigandMetadata {
        LigandMetadata {
            name: "PROTOPORPHYRIN IX CONTAINING FE".to_string(),
            formula: "C34 H32 Fe N4 O4".to_string(),
            formula_weight: Some(616.487),
            chain_id: "A".to_string(),
            residue_number: Some(201),
            residue_name: "HEM".to_string(),
        }
    }

    fn descriptors(hydrophobic_perc: Option<f64>) -> DescriptorRecord {
        DescriptorRecord {
            atom_count: 42,
            gyration_radius: 5.4321,
            sasa: 812.456,
            aromatic_count: 2,
            hydrophobic_perc,
            unique_residue_count: 9,
            polar_count: 3,
            nonpolar_count: 5,
        }
    }

    fn sample_report() -> ProteinReport {
        ProteinReport {
            protein_id: "1A28".to_string(),
            pocket_count: 3,
            bound_count: 1,
            pockets: vec![
                LigandReport {
                    ligand: heme(),
                    outcome: PocketOutcome::Bound {
                        descriptors: descriptors(Some(62.5)),
                        bond_count: Some(40),
                    },
                },
                LigandReport {
                    ligand: heme(),
                    outcome: PocketOutcome::Unbound,
                },
                LigandReport {
                    ligand: LigandMetadata {
                        name: String::new(),
                        ..heme()
                    },
                    outcome: PocketOutcome::Invalid {
                        reason: "Ligand chemical name is missing".to_string(),
                    },
                },
            ],
        }
    }

    fn render(format: ReportFormat, reports: &[ProteinReport]) -> String {
        let mut out = Vec::new();
        write_reports(reports, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_report_has_banner_and_one_section_per_pocket() {
        let text = render(ReportFormat::Text, &[sample_report()]);

        assert!(text.contains(&"=".repeat(60)));
        assert!(text.contains(" PROTEIN: 1A28 | TOTAL POCKETS FOUND: 3"));
        assert!(text.contains("[ POCKET 1 ]"));
        assert!(text.contains("[ POCKET 3 ]"));
        assert!(text.contains("• Formula's weight: 616.49"));
        assert!(text.contains("• Residue: HEM A/201"));
        assert!(text.contains("• Hydrophobicity: 62.50"));
        assert!(text.contains("• Solvent accessible surface area: 812.46"));
        assert!(text.contains("• Gyration radius: 5.43"));
        assert!(text.contains("• Inferred bonds: 40"));
        assert!(text.contains("[ Ligand not bound to the protein ]"));
        assert!(text.contains("[ Ligand skipped: Ligand chemical name is missing ]"));
    }

    #[test]
    fn text_report_prints_undefined_values_as_na() {
        let mut report = sample_report();
        report.pockets[0].outcome = PocketOutcome::Bound {
            descriptors: descriptors(None),
            bond_count: None,
        };
        report.pockets[0].ligand.formula_weight = None;
        let text = render(ReportFormat::Text, &[report]);

        assert!(text.contains("• Hydrophobicity: n/a"));
        assert!(text.contains("• Formula's weight: n/a"));
        assert!(!text.contains("Inferred bonds"));
    }

    #[test]
    fn json_report_is_an_array_of_tagged_outcomes() {
        let json = render(ReportFormat::Json, &[sample_report()]);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let pockets = &value[0]["pockets"];
        assert_eq!(value[0]["protein_id"], "1A28");
        assert_eq!(pockets[0]["outcome"]["status"], "bound");
        assert_eq!(pockets[0]["outcome"]["descriptors"]["atom_count"], 42);
        assert_eq!(pockets[1]["outcome"]["status"], "unbound");
        assert_eq!(pockets[2]["outcome"]["status"], "invalid");
    }

    #[test]
    fn csv_report_has_one_row_per_ligand_and_blank_cells_for_missing_values() {
        let mut report = sample_report();
        report.pockets[0].outcome = PocketOutcome::Bound {
            descriptors: descriptors(None),
            bond_count: None,
        };
        let csv_text = render(ReportFormat::Csv, &[report.clone(), report]);

        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
        let headers = reader.headers().unwrap().clone();
        let col = |name: &str| headers.iter().position(|h| h == name).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(rows.len(), 6);
        assert_eq!(&rows[0][col("status")], "bound");
        assert_eq!(&rows[0][col("atom_count")], "42");
        assert_eq!(&rows[0][col("hydrophobic_perc")], "");
        assert_eq!(&rows[1][col("status")], "unbound");
        assert_eq!(&rows[1][col("sasa")], "");
        assert_eq!(&rows[2][col("reason")], "Ligand chemical name is missing");
        assert_eq!(&rows[3][col("pocket")], "1");
    }
}
