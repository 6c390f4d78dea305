//! Minor-body catalog reader.
//!
//! Parses the CSV export format of small-body databases: one header line,
//! then rows of at least eight comma-separated fields
//!
//! ```text
//! name, (unused), e, a[AU], i[deg], Ω[deg], GM|"null", ω[deg]
//! ```
//!
//! Rows that are short, fail to parse, or carry unbound elements are
//! skipped with a warning, never an error; the load as a whole fails only
//! when the file cannot be opened. Masses come from the GM column when
//! present and otherwise fall back to a per-belt estimate.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

use nbody::Scalar;

use crate::kepler::{radians, OrbitalElements};

/// Which population a catalog file describes; sets the mass-estimation
/// fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Belt {
    Main,
    Kuiper,
}

impl Belt {
    pub fn name(self) -> &'static str {
        match self {
            Belt::Main => "main belt",
            Belt::Kuiper => "Kuiper belt",
        }
    }

    /// Catalog-average body mass in kilograms, used when a row supplies
    /// neither GM nor a diameter.
    pub fn average_mass(self) -> f64 {
        match self {
            Belt::Main => 4.78e13,
            Belt::Kuiper => 5.0e16,
        }
    }

    /// Bulk density in kg/m³ for the diameter-based mass estimate.
    pub fn density(self) -> f64 {
        match self {
            Belt::Main => 2.5e3,
            Belt::Kuiper => 1.0e3,
        }
    }
}

/// The only fatal failure mode of a catalog load.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to open catalog {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One successfully parsed catalog row.
#[derive(Debug, Clone)]
pub struct MinorBody<T> {
    pub name: String,
    /// Mass in kilograms.
    pub mass: T,
    /// Elements with the semi-major axis in AU and angles in radians.
    pub elements: OrbitalElements<T>,
}

/// Row accounting for one load.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeltSummary {
    pub loaded: usize,
    pub skipped: usize,
    /// Sum of the loaded masses in kilograms.
    pub total_mass: f64,
}

/// Reads a belt catalog from any reader. Infallible: malformed rows are
/// skipped and counted.
pub fn read_belt<T: Scalar, R: Read>(reader: R, belt: Belt) -> (Vec<MinorBody<T>>, BeltSummary) {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut bodies = Vec::new();
    let mut summary = BeltSummary::default();

    for record in csv_reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                warn!("skipping unreadable {} row: {err}", belt.name());
                summary.skipped += 1;
                continue;
            }
        };

        match parse_row::<T>(&record, belt) {
            Some(body) => {
                summary.total_mass += body.mass.to_f64();
                summary.loaded += 1;
                bodies.push(body);
            }
            None => summary.skipped += 1,
        }
    }

    (bodies, summary)
}

/// Reads a belt catalog from a file, logging the per-file tallies.
pub fn load_belt_file<T: Scalar, P: AsRef<Path>>(
    path: P,
    belt: Belt,
) -> Result<(Vec<MinorBody<T>>, BeltSummary), CatalogError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CatalogError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let (bodies, summary) = read_belt(file, belt);

    info!(
        "{}, file {}: loaded {} bodies, skipped {}",
        belt.name(),
        path.display(),
        summary.loaded,
        summary.skipped
    );
    info!(
        "total {} mass loaded: {:.3e} kg",
        belt.name(),
        summary.total_mass
    );

    Ok((bodies, summary))
}

fn parse_row<T: Scalar>(record: &csv::StringRecord, belt: Belt) -> Option<MinorBody<T>> {
    if record.len() < 8 {
        warn!(
            "skipping short {} row ({} fields): {:?}",
            belt.name(),
            record.len(),
            record
        );
        return None;
    }

    let name = record[0].trim().to_string();

    let Some(e) = parse_numeric(&record[2]) else {
        return skip(belt, &name, "eccentricity");
    };
    let Some(a) = parse_numeric(&record[3]) else {
        return skip(belt, &name, "semi-major axis");
    };
    let Some(i) = parse_numeric(&record[4]) else {
        return skip(belt, &name, "inclination");
    };
    let Some(node) = parse_numeric(&record[5]) else {
        return skip(belt, &name, "ascending node");
    };
    let Some(w) = parse_numeric(&record[7]) else {
        return skip(belt, &name, "argument of periapsis");
    };

    let gm = parse_gm(&record[6]);

    if a <= 0.0 || !(0.0..1.0).contains(&e) {
        warn!(
            "skipping {} body {name}: unbound or degenerate elements (a = {a}, e = {e})",
            belt.name()
        );
        return None;
    }

    let mass = estimate_mass(gm, 0.0, belt);

    Some(MinorBody {
        name,
        mass: T::from_f64(mass),
        elements: OrbitalElements {
            semi_major_axis: T::from_f64(a),
            eccentricity: T::from_f64(e),
            inclination: radians(T::from_f64(i)),
            longitude_ascending_node: radians(T::from_f64(node)),
            argument_of_periapsis: radians(T::from_f64(w)),
            mean_anomaly: T::zero(),
        },
    })
}

fn skip<T>(belt: Belt, name: &str, field: &str) -> Option<T> {
    warn!("skipping {} body {name}: unparsable {field}", belt.name());
    None
}

/// Numeric field with the catalog's bare-point convention: a leading '.'
/// reads as "0.".
fn parse_numeric(field: &str) -> Option<f64> {
    let field = field.trim();
    if let Some(rest) = field.strip_prefix('.') {
        return format!("0.{rest}").parse().ok();
    }
    field.parse().ok()
}

/// The GM column: absent values are written as "null" or left empty.
fn parse_gm(field: &str) -> f64 {
    let field = field.trim();
    if field.is_empty() || field == "null" {
        return 0.0;
    }
    parse_numeric(field).unwrap_or(0.0)
}

/// Mass in kilograms from whatever the row offers: GM/G when GM is known,
/// a density-sphere estimate when only a diameter (km) is, and the belt
/// average otherwise.
pub fn estimate_mass(gm: f64, diameter_km: f64, belt: Belt) -> f64 {
    let g = crate::solar::GRAVITATIONAL_CONSTANT;

    if gm > 0.0 {
        return gm / g;
    }

    if diameter_km > 0.0 {
        let radius = diameter_km * 1e3 / 2.0;
        return (4.0 / 3.0) * std::f64::consts::PI * radius.powi(3) * belt.density();
    }

    belt.average_mass()
}
