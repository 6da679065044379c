use super::altloc::FirstOccurrence;
use super::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::atom_set::AtomSet;
use crate::core::models::element::Element;
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;

const ATOM_SITE_PREFIX: &str = "_atom_site.";

#[derive(Debug, Error)]
pub enum CifError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: CifParseErrorKind },
    #[error("No `_atom_site` loop found")]
    MissingAtomSite,
    #[error("The `_atom_site` loop has no `{0}` column")]
    MissingColumn(String),
}

#[derive(Debug, Error)]
pub enum CifParseErrorKind {
    #[error("Unterminated quoted value")]
    UnterminatedQuote,
    #[error("Unterminated semicolon text field")]
    UnterminatedTextField,
    #[error("Loop has {columns} columns but {values} values")]
    RowLengthMismatch { columns: usize, values: usize },
    #[error("Invalid integer in column {column} (value: '{value}')")]
    InvalidInt { column: String, value: String },
    #[error("Invalid float in column {column} (value: '{value}')")]
    InvalidFloat { column: String, value: String },
    #[error("Required value in column {column} is missing")]
    MissingValue { column: String },
}

#[derive(Debug, Clone, PartialEq)]
struct Token {
    value: String,
    quoted: bool,
    line: usize,
}

impl Token {
    // `.` (inapplicable) and `?` (unknown) are nulls unless quoted.
    fn as_value(&self) -> Option<&str> {
        if !self.quoted && (self.value == "." || self.value == "?") {
            None
        } else {
            Some(&self.value)
        }
    }
}

#[derive(Debug, Default)]
struct AtomSiteLoop {
    columns: Vec<String>,
    tokens: Vec<Token>,
}

impl AtomSiteLoop {
    fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// First present column among `names`, in order of preference.
    fn any_column(&self, names: &[&str]) -> Option<usize> {
        names.iter().find_map(|name| self.column(name))
    }

    fn require_column(&self, names: &[&str]) -> Result<usize, CifError> {
        self.any_column(names)
            .ok_or_else(|| CifError::MissingColumn(names[0].to_string()))
    }
}

/// Reader for PDBx/mmCIF files.
///
/// Only the `_atom_site` category is read. Author-assigned identifiers
/// (`auth_*`) are preferred over label identifiers, matching the numbering
/// used by PDB-format files and by ligand metadata services.
pub struct CifFile;

impl StructureFile for CifFile {
    type Error = CifError;

    fn read_from(reader: &mut impl BufRead) -> Result<AtomSet, Self::Error> {
        let table = read_atom_site_loop(reader)?;
        build_atoms(&table)
    }
}

enum ScanState {
    Searching,
    Header,
    Body,
}

fn read_atom_site_loop(reader: &mut impl BufRead) -> Result<AtomSiteLoop, CifError> {
    let mut table = AtomSiteLoop::default();
    let mut state = ScanState::Searching;
    let mut text_field: Option<(String, usize)> = None;

    for (line_num, line_res) in reader.lines().enumerate() {
        let line = line_res?;
        let line_num = line_num + 1;

        if let Some((mut text, start_line)) = text_field.take() {
            if line.starts_with(';') {
                table.tokens.push(Token {
                    value: text.trim_end().to_string(),
                    quoted: true,
                    line: start_line,
                });
            } else {
                text.push('\n');
                text.push_str(&line);
                text_field = Some((text, start_line));
            }
            continue;
        }

        let trimmed = line.trim();
        match state {
            ScanState::Searching => {
                if trimmed == "loop_" {
                    table.columns.clear();
                    state = ScanState::Header;
                }
            }
            ScanState::Header => {
                if let Some(column) = trimmed.strip_prefix(ATOM_SITE_PREFIX) {
                    table.columns.push(column.to_string());
                } else if table.columns.is_empty() {
                    // A loop over some other category.
                    state = ScanState::Searching;
                } else {
                    state = ScanState::Body;
                    if let Some(start) = line.strip_prefix(';') {
                        text_field = Some((start.to_string(), line_num));
                    } else {
                        tokenize_into(&line, line_num, &mut table.tokens)?;
                    }
                }
            }
            ScanState::Body => {
                if trimmed.starts_with('_')
                    || trimmed.starts_with('#')
                    || trimmed == "loop_"
                    || trimmed.starts_with("data_")
                {
                    break;
                }
                if let Some(start) = line.strip_prefix(';') {
                    text_field = Some((start.to_string(), line_num));
                } else {
                    tokenize_into(&line, line_num, &mut table.tokens)?;
                }
            }
        }
    }

    if let Some((_, start_line)) = text_field {
        return Err(CifError::Parse {
            line: start_line,
            kind: CifParseErrorKind::UnterminatedTextField,
        });
    }
    if table.columns.is_empty() {
        return Err(CifError::MissingAtomSite);
    }
    if table.tokens.len() % table.columns.len() != 0 {
        return Err(CifError::Parse {
            line: table.tokens.last().map_or(0, |t| t.line),
            kind: CifParseErrorKind::RowLengthMismatch {
                columns: table.columns.len(),
                values: table.tokens.len(),
            },
        });
    }
    Ok(table)
}

fn tokenize_into(line: &str, line_num: usize, tokens: &mut Vec<Token>) -> Result<(), CifError> {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        if c == b'#' {
            break;
        }
        if c == b'\'' || c == b'"' {
            let start = i + 1;
            let mut end = start;
            // A quote only closes the value when followed by whitespace or EOL.
            loop {
                if end >= bytes.len() {
                    return Err(CifError::Parse {
                        line: line_num,
                        kind: CifParseErrorKind::UnterminatedQuote,
                    });
                }
                if bytes[end] == c && bytes.get(end + 1).is_none_or(|b| b.is_ascii_whitespace()) {
                    break;
                }
                end += 1;
            }
            tokens.push(Token {
                value: line[start..end].to_string(),
                quoted: true,
                line: line_num,
            });
            i = end + 1;
        } else {
            let start = i;
            while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            tokens.push(Token {
                value: line[start..i].to_string(),
                quoted: false,
                line: line_num,
            });
        }
    }
    Ok(())
}

struct AtomSiteColumns {
    atom_name: [Option<usize>; 2],
    residue_name: [Option<usize>; 2],
    chain_id: [Option<usize>; 2],
    residue_number: [Option<usize>; 2],
    insertion_code: Option<usize>,
    element: Option<usize>,
    model: Option<usize>,
    x: usize,
    y: usize,
    z: usize,
}

impl AtomSiteColumns {
    fn locate(table: &AtomSiteLoop) -> Result<Self, CifError> {
        let pair = |auth: &str, label: &str| -> Result<[Option<usize>; 2], CifError> {
            table.require_column(&[auth, label])?;
            Ok([table.column(auth), table.column(label)])
        };
        Ok(Self {
            atom_name: pair("auth_atom_id", "label_atom_id")?,
            residue_name: pair("auth_comp_id", "label_comp_id")?,
            chain_id: pair("auth_asym_id", "label_asym_id")?,
            residue_number: pair("auth_seq_id", "label_seq_id")?,
            insertion_code: table.column("pdbx_PDB_ins_code"),
            element: table.column("type_symbol"),
            model: table.column("pdbx_PDB_model_num"),
            x: table.require_column(&["Cartn_x"])?,
            y: table.require_column(&["Cartn_y"])?,
            z: table.require_column(&["Cartn_z"])?,
        })
    }
}

fn field(row: &[Token], column: Option<usize>) -> Option<&str> {
    column.and_then(|c| row[c].as_value())
}

fn preferred<'a>(
    row: &'a [Token],
    columns: &[Option<usize>; 2],
    name: &str,
) -> Result<&'a str, CifError> {
    field(row, columns[0])
        .or_else(|| field(row, columns[1]))
        .ok_or_else(|| CifError::Parse {
            line: row[0].line,
            kind: CifParseErrorKind::MissingValue {
                column: name.to_string(),
            },
        })
}

fn coordinate(table: &AtomSiteLoop, row: &[Token], column: usize) -> Result<f64, CifError> {
    let token = &row[column];
    token.value.parse().map_err(|_| CifError::Parse {
        line: token.line,
        kind: CifParseErrorKind::InvalidFloat {
            column: table.columns[column].clone(),
            value: token.value.clone(),
        },
    })
}

fn build_atoms(table: &AtomSiteLoop) -> Result<AtomSet, CifError> {
    let cols = AtomSiteColumns::locate(table)?;
    let mut atoms = Vec::new();
    let mut first_occurrence = FirstOccurrence::default();
    let mut first_model: Option<&str> = None;

    for row in table.tokens.chunks_exact(table.columns.len()) {
        if let Some(model) = field(row, cols.model) {
            match first_model {
                None => first_model = Some(model),
                Some(first) if first != model => continue,
                Some(_) => {}
            }
        }

        let atom_name = preferred(row, &cols.atom_name, "auth_atom_id")?;
        let residue_name = preferred(row, &cols.residue_name, "auth_comp_id")?.to_ascii_uppercase();
        let chain_id = preferred(row, &cols.chain_id, "auth_asym_id")?;
        let seq_str = preferred(row, &cols.residue_number, "auth_seq_id")?;
        let residue_number: isize = seq_str.parse().map_err(|_| CifError::Parse {
            line: row[0].line,
            kind: CifParseErrorKind::InvalidInt {
                column: "auth_seq_id".to_string(),
                value: seq_str.to_string(),
            },
        })?;
        let insertion_code = field(row, cols.insertion_code).unwrap_or("");

        let x = coordinate(table, row, cols.x)?;
        let y = coordinate(table, row, cols.y)?;
        let z = coordinate(table, row, cols.z)?;

        if !first_occurrence.accept(
            chain_id,
            residue_number,
            insertion_code,
            &residue_name,
            atom_name,
        ) {
            continue;
        }

        let element = field(row, cols.element)
            .and_then(|symbol| symbol.parse().ok())
            .unwrap_or_else(|| Element::infer_from_atom_name(atom_name));

        atoms.push(Atom::new(
            chain_id,
            residue_number,
            &residue_name,
            atom_name,
            element,
            Point3::new(x, y, z),
        ));
    }

    Ok(AtomSet::new(atoms))
}
