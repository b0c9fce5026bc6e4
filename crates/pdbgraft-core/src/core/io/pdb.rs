use crate::core::io::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::builder::StructureBuilder;
use crate::core::models::ids::{HeteroFlag, ResidueKey};
use crate::core::models::residue::Residue;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

const WATER_RESIDUE_NAMES: [&str; 2] = ["HOH", "WAT"];
const MIN_ATOM_RECORD_LEN: usize = 54;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
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
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

fn single_char(line: &str, column: usize) -> Option<char> {
    line.get(column..column + 1)
        .and_then(|s| s.chars().next())
        .filter(|c| !c.is_whitespace())
}

fn parse_int(line: &str, line_num: usize, start: usize, end: usize) -> Result<isize, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidInt {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

fn parse_float(line: &str, line_num: usize, start: usize, end: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

fn parse_float_or(
    line: &str,
    line_num: usize,
    start: usize,
    end: usize,
    default: f64,
) -> Result<f64, PdbError> {
    if slice_and_trim(line, start, end).is_empty() {
        Ok(default)
    } else {
        parse_float(line, line_num, start, end)
    }
}

fn hetero_flag(record_type: &str, residue_name: &str) -> HeteroFlag {
    if record_type != "HETATM" {
        HeteroFlag::Standard
    } else if WATER_RESIDUE_NAMES.contains(&residue_name) {
        HeteroFlag::Water
    } else {
        HeteroFlag::Hetero(residue_name.to_string())
    }
}

/// Fixed-column PDB reader and writer.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(name: &str, reader: &mut impl BufRead) -> Result<Structure, Self::Error> {
        let mut builder = StructureBuilder::new(name);
        let mut atom_count = 0usize;

        let mut current_chain_id: Option<String> = None;
        let mut current_key: Option<ResidueKey> = None;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let record_type = slice_and_trim(&line, 0, 6);

            match record_type {
                "MODEL" => {
                    let serial = parse_int(&line, line_num, 10, 14)?;
                    builder.start_model(serial.max(0) as usize);
                    current_chain_id = None;
                    current_key = None;
                }
                "ATOM" | "HETATM" => {
                    if line.len() < MIN_ATOM_RECORD_LEN {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::LineTooShort,
                        });
                    }

                    let atom_name = slice_and_trim(&line, 12, 16);
                    if atom_name.is_empty() {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::MissingRequiredField {
                                columns: "13-16".into(),
                            },
                        });
                    }
                    let serial_str = slice_and_trim(&line, 6, 11);
                    let serial = if serial_str.is_empty() {
                        0
                    } else {
                        parse_int(&line, line_num, 6, 11)?.max(0) as usize
                    };
                    let alt_loc = single_char(&line, 16);
                    let res_name = slice_and_trim(&line, 17, 20);
                    let chain_id = slice_and_trim(&line, 21, 22);
                    let res_seq = parse_int(&line, line_num, 22, 26)?;
                    let insertion = single_char(&line, 26);
                    let x = parse_float(&line, line_num, 30, 38)?;
                    let y = parse_float(&line, line_num, 38, 46)?;
                    let z = parse_float(&line, line_num, 46, 54)?;
                    let occupancy = parse_float_or(&line, line_num, 54, 60, 1.0)?;
                    let b_factor = parse_float_or(&line, line_num, 60, 66, 0.0)?;
                    let segment = slice_and_trim(&line, 72, 76);
                    let element = slice_and_trim(&line, 76, 78);
                    let charge = slice_and_trim(&line, 78, 80);

                    if current_chain_id.as_deref() != Some(chain_id) {
                        builder.start_chain(chain_id);
                        current_chain_id = Some(chain_id.to_string());
                        current_key = None;
                    }
                    let hetero = hetero_flag(record_type, res_name);
                    let key = ResidueKey::new(hetero, res_seq, insertion);
                    if current_key.as_ref() != Some(&key) {
                        builder.start_residue(key.clone(), res_name).set_segment(segment);
                        current_key = Some(key);
                    }

                    if alt_loc.is_some() && builder.current_residue_has_atom(atom_name) {
                        // Only the first alternate location of an atom is kept.
                        continue;
                    }

                    let mut atom = Atom::new(atom_name, Point3::new(x, y, z));
                    atom.serial = serial;
                    atom.alt_loc = alt_loc;
                    atom.occupancy = occupancy;
                    atom.b_factor = b_factor;
                    if !element.is_empty() {
                        atom.element = element.to_ascii_uppercase();
                    }
                    atom.charge = charge.to_string();
                    builder.add_atom(atom);
                    atom_count += 1;
                }
                "END" => break,
                _ => {}
            }
        }

        if atom_count == 0 {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }
        Ok(builder.build())
    }

    fn write_to(structure: &Structure, writer: &mut impl Write) -> Result<(), Self::Error> {
        let multi_model = structure.models().len() > 1;
        let mut serial = 1usize;

        for model in structure.models() {
            if multi_model {
                writeln!(writer, "MODEL     {:>4}", model.serial)?;
            }
            for chain in model.chains() {
                let chain_char = chain.id.chars().next().unwrap_or(' ');
                let mut last_residue: Option<&Residue> = None;
                for residue in chain.iter() {
                    for atom in residue.atoms() {
                        writeln!(
                            writer,
                            "{}",
                            format_atom_line(serial, atom, residue, chain_char)
                        )?;
                        serial += 1;
                    }
                    last_residue = Some(residue);
                }
                if let Some(residue) = last_residue {
                    let key = residue.key();
                    writeln!(
                        writer,
                        "TER   {:>5}      {:>3} {}{:>4}{}",
                        serial,
                        residue.name,
                        chain_char,
                        key.number,
                        key.insertion.unwrap_or(' ')
                    )?;
                    serial += 1;
                }
            }
            if multi_model {
                writeln!(writer, "ENDMDL")?;
            }
        }

        writeln!(writer, "END")?;
        Ok(())
    }
}

fn format_atom_name(name: &str, element: &str) -> String {
    if name.len() >= 4 {
        name.chars().take(4).collect()
    } else if element.len() == 1 {
        format!(" {:<3}", name)
    } else {
        format!("{:<4}", name)
    }
}

fn format_atom_line(serial: usize, atom: &Atom, residue: &Residue, chain_char: char) -> String {
    let key = residue.key();
    let record_type = if key.hetero.is_standard() {
        "ATOM"
    } else {
        "HETATM"
    };
    format!(
        "{:<6}{:>5} {}{}{:>3} {}{:>4}{}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}      {:<4}{:>2}{:>2}",
        record_type,
        serial,
        format_atom_name(&atom.name, &atom.element),
        atom.alt_loc.unwrap_or(' '),
        residue.name,
        chain_char,
        key.number,
        key.insertion.unwrap_or(' '),
        atom.position.x,
        atom.position.y,
        atom.position.z,
        atom.occupancy,
        atom.b_factor,
        residue.segment,
        atom.element,
        atom.charge
    )
}
