use super::altloc::FirstOccurrence;
use super::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::atom_set::AtomSet;
use crate::core::models::element::Element;
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

/// Reader for fixed-column PDB files.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<AtomSet, Self::Error> {
        let mut atoms = Vec::new();
        let mut first_occurrence = FirstOccurrence::default();
        let mut model_seen = false;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            match slice_and_trim(&line, 0, 6) {
                "MODEL" => {
                    if model_seen {
                        break;
                    }
                    model_seen = true;
                }
                "ENDMDL" => break,
                "ATOM" | "HETATM" => {
                    if let Some(atom) = parse_atom_line(&line, line_num, &mut first_occurrence)? {
                        atoms.push(atom);
                    }
                }
                _ => {}
            }
        }

        Ok(AtomSet::new(atoms))
    }
}

fn parse_atom_line(
    line: &str,
    line_num: usize,
    first_occurrence: &mut FirstOccurrence,
) -> Result<Option<Atom>, PdbError> {
    if line.len() < 54 {
        return Err(PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::LineTooShort,
        });
    }

    let name = slice_and_trim(line, 12, 16);
    let res_name = slice_and_trim(line, 17, 20);
    let chain_id = slice_and_trim(line, 21, 22);
    let res_seq_str = slice_and_trim(line, 22, 26);
    let insertion_code = slice_and_trim(line, 26, 27);
    let element_str = slice_and_trim(line, 76, 78);

    if name.is_empty() {
        return Err(PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::MissingRequiredField {
                columns: "13-16".into(),
            },
        });
    }

    let res_seq: isize = res_seq_str.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidInt {
            columns: "23-26".into(),
            value: res_seq_str.into(),
        },
    })?;

    let parse_coord = |start: usize, end: usize, columns: &str| -> Result<f64, PdbError> {
        let value = slice_and_trim(line, start, end);
        value.parse().map_err(|_| PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::InvalidFloat {
                columns: columns.into(),
                value: value.into(),
            },
        })
    };
    let x = parse_coord(30, 38, "31-38")?;
    let y = parse_coord(38, 46, "39-46")?;
    let z = parse_coord(46, 54, "47-54")?;

    let res_name_upper = res_name.to_ascii_uppercase();
    if !first_occurrence.accept(chain_id, res_seq, insertion_code, &res_name_upper, name) {
        return Ok(None);
    }

    let element = element_str
        .parse()
        .unwrap_or_else(|_| Element::infer_from_atom_name(name));

    Ok(Some(Atom::new(
        chain_id,
        res_seq,
        &res_name_upper,
        name,
        element,
        Point3::new(x, y, z),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
HEADER    TEST STRUCTURE
ATOM      1  N   GLY A   1      -1.000   2.000   3.000  1.00 10.00           N
ATOM      2  CA  GLY A   1       0.000   2.000   3.000  1.00 10.00           C
ATOM      3  OG ASER A   2       1.000   1.000   1.000  0.50 10.00           O
ATOM      4  OG BSER A   2       1.200   1.000   1.000  0.50 10.00           O
HETATM    5 FE   HEM A 201      10.000  10.000  10.000  1.00 10.00          FE
HETATM    6  O   HOH A 301      20.000  20.000  20.000  1.00 10.00
END
";

    #[test]
    fn reads_atoms_with_fields_and_elements() {
        let atoms = PdbFile::read_from_str(SAMPLE).unwrap();
        assert_eq!(atoms.len(), 5);

        let n = &atoms[0];
        assert_eq!(n.name(), "N");
        assert_eq!(n.residue_name(), "GLY");
        assert_eq!(n.chain_id(), "A");
        assert_eq!(n.residue_number(), 1);
        assert_eq!(n.element(), Element::N);
        assert!((n.position().x + 1.0).abs() < 1e-9);

        let fe = &atoms[3];
        assert_eq!(fe.element(), Element::Fe);
        assert_eq!(fe.residue_name(), "HEM");
        assert_eq!(fe.residue_number(), 201);
    }

    #[test]
    fn alternate_locations_keep_the_first() {
        let atoms = PdbFile::read_from_str(SAMPLE).unwrap();
        let og: Vec<_> = atoms.iter().filter(|a| a.name() == "OG").collect();
        assert_eq!(og.len(), 1);
        assert!((og[0].position().x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn missing_element_column_is_inferred_from_name() {
        let atoms = PdbFile::read_from_str(SAMPLE).unwrap();
        let water = atoms.iter().find(|a| a.residue_name() == "HOH").unwrap();
        assert_eq!(water.element(), Element::O);
    }

    #[test]
    fn only_the_first_model_is_read() {
        let content = "\
MODEL        1
ATOM      1  CA  ALA A   1       0.000   0.000   0.000  1.00  0.00           C
ENDMDL
MODEL        2
ATOM      1  CA  ALA A   1       5.000   0.000   0.000  1.00  0.00           C
ENDMDL
";
        let atoms = PdbFile::read_from_str(content).unwrap();
        assert_eq!(atoms.len(), 1);
        assert_eq!(atoms[0].position().x, 0.0);
    }

    #[test]
    fn bad_coordinate_reports_line_and_columns() {
        let content =
            "ATOM      1  CA  ALA A   1       x.xxx   0.000   0.000  1.00  0.00           C\n";
        match PdbFile::read_from_str(content) {
            Err(PdbError::Parse {
                line: 1,
                kind: PdbParseErrorKind::InvalidFloat { columns, .. },
            }) => assert_eq!(columns, "31-38"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn short_atom_line_is_rejected() {
        let result = PdbFile::read_from_str("ATOM      1  CA  ALA A   1\n");
        assert!(matches!(
            result,
            Err(PdbError::Parse {
                kind: PdbParseErrorKind::LineTooShort,
                ..
            })
        ));
    }

    #[test]
    fn read_from_path_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.pdb");
        std::fs::write(&path, SAMPLE).unwrap();
        assert_eq!(PdbFile::read_from_path(&path).unwrap().len(), 5);
    }
}
