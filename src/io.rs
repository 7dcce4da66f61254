//! Textual serialization of the aggregate point set: one point per
//! line, generation index then one column per axis.

use std::io::{self, BufRead, Write};

use crate::aggregate::Aggregate;
use crate::error::Error;
use crate::types::{GenerationIndex, LatticePoint};

/// Order in which points are written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOrder {
    /// Sorted by the order in which particles stuck.
    Generation,
    /// As stored in the membership map; no sorting.
    Unordered,
}

pub fn write_aggregate<P: LatticePoint, W: Write>(
    out: &mut W,
    aggregate: &Aggregate<P>,
    order: WriteOrder,
) -> io::Result<()> {
    match order {
        WriteOrder::Generation => {
            for (index, point) in aggregate.ordered().iter().enumerate() {
                write_record(out, index, *point)?;
            }
        }
        WriteOrder::Unordered => {
            for (point, index) in aggregate.iter() {
                write_record(out, index, point)?;
            }
        }
    }
    Ok(())
}

fn write_record<P: LatticePoint, W: Write>(
    out: &mut W,
    index: GenerationIndex,
    point: P,
) -> io::Result<()> {
    write!(out, "{index}")?;
    for i in 0..P::DIM {
        write!(out, "\t{}", point.axis(i))?;
    }
    writeln!(out)
}

/// Parses records produced by [`write_aggregate`]; blank lines are
/// skipped, malformed records are `Error::MalformedRecord`.
pub fn parse_points<P: LatticePoint, R: BufRead>(
    reader: R,
) -> Result<Vec<(GenerationIndex, P)>, Error> {
    let mut points = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != P::DIM + 1 {
            return Err(Error::MalformedRecord {
                line: line_no + 1,
                reason: format!("expected {} fields, found {}", P::DIM + 1, fields.len()),
            });
        }
        let index: GenerationIndex = parse_field(fields[0], line_no)?;
        let mut axes = [0i32; 3];
        for (i, field) in fields[1..].iter().copied().enumerate() {
            axes[i] = parse_field(field, line_no)?;
        }
        points.push((index, P::from_xyz(axes[0], axes[1], axes[2])));
    }
    Ok(points)
}

fn parse_field<T: std::str::FromStr>(field: &str, line_no: usize) -> Result<T, Error> {
    field.parse().map_err(|_| Error::MalformedRecord {
        line: line_no + 1,
        reason: format!("invalid numeric field {field:?}"),
    })
}
