/**
 * SvdRec
 * Copyright (C) 2018 Sebastian Schelter
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

use std::fs::File;
use std::io::{BufReader, Read, Write, stdout};
use std::path::Path;

use crate::encoders::NameEncoder;
use crate::error::{Result, SvdRecError};
use crate::matrix::InteractionMatrix;

/// Reads a CSV input file. We expect NO headers, and a `rowID, colID, value, ...` triplet per line.
/// Any columns after the value are ignored.
pub fn csv_reader(file: &str, delimiter: u8) -> Result<csv::Reader<File>> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(file)?;

    Ok(reader)
}

fn parse_id(field: &str, line: usize) -> Result<usize> {
    let value: f64 = field.trim().parse()
        .map_err(|_| SvdRecError::MalformedInput(format!("line {}: '{}' is not an id", line, field)))?;

    if value < 1.0 || value.fract() != 0.0 {
        return Err(SvdRecError::MalformedInput(
            format!("line {}: ids must be positive integers, found {}", line, field)));
    }

    Ok(value as usize)
}

/// Parses one-based `(row, col, value)` triplets, skipping the first `skip_rows` lines.
pub fn read_triplets<R: Read>(
    reader: &mut csv::Reader<R>,
    skip_rows: usize,
) -> Result<Vec<(usize, usize, f64)>> {

    let mut triplets = Vec::new();

    for (line, record) in reader.records().enumerate().skip(skip_rows) {
        let record = record?;

        if record.len() < 3 {
            return Err(SvdRecError::MalformedInput(
                format!("line {}: expected at least 3 columns, found {}", line + 1, record.len())));
        }

        let row = parse_id(&record[0], line + 1)?;
        let col = parse_id(&record[1], line + 1)?;
        let value: f64 = record[2].trim().parse().map_err(|_| {
            SvdRecError::MalformedInput(format!("line {}: '{}' is not a number", line + 1, &record[2]))
        })?;

        triplets.push((row, col, value));
    }

    Ok(triplets)
}

/// Loads the interaction matrix from a CSV file of one-based triplets.
pub fn read_matrix(file: &str, delimiter: u8, skip_rows: usize) -> Result<InteractionMatrix> {
    let mut reader = csv_reader(file, delimiter)?;
    let triplets = read_triplets(&mut reader, skip_rows)?;

    InteractionMatrix::from_triplets(triplets)
}

/// Loads an id to name mapping from a JSON file holding a single object.
pub fn read_encoder(file: &str) -> Result<NameEncoder> {
    let reader = BufReader::new(File::open(Path::new(file))?);
    let value: serde_json::Value = serde_json::from_reader(reader)?;

    NameEncoder::from_json(&value)
}

/// Struct used for JSON serialization of a recommended item. Field names will be used in JSON.
#[derive(Serialize, Debug)]
pub struct RecommendedItem {
    pub item: usize,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// The recommendations for a single user or item.
#[derive(Serialize, Debug)]
pub struct Recommendations {
    pub id: usize,
    pub name: String,
    pub recommended: Vec<RecommendedItem>,
}

/// Output recommendations in JSON format, one object per line. If an `output_path` is supplied,
/// we write to a file at the specified path, otherwise, we output to stdout.
pub fn write_recommendations<I>(recommendations: I, output_path: Option<String>) -> Result<()>
    where I: IntoIterator<Item=Recommendations> {

    let out: Box<dyn Write> = match output_path {
        Some(path) => Box::new(File::create(&Path::new(&path))?),
        _ => Box::new(stdout())
    };

    write_json_lines(recommendations, out)
}

fn write_json_lines<I, W>(recommendations: I, mut out: W) -> Result<()>
    where I: IntoIterator<Item=Recommendations>, W: Write {

    for entry in recommendations {
        writeln!(out, "{}", serde_json::to_string(&entry)?)?;
    }

    out.flush()?;

    Ok(())
}
