//! Functions for reading/writing CSV format.
pub use csv::Error;
use crate::Locus;
use csv::{ReaderBuilder, Writer};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io::Cursor;

/// One solvable sample of a [`Locus`] as a CSV record.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct LocusRow {
    /// Input angle
    pub input: f64,
    /// Coupler angle
    pub coupler: f64,
    /// Output angle
    pub output: f64,
    /// X coordinate of the coupler point
    pub x: f64,
    /// Y coordinate of the coupler point
    pub y: f64,
}

/// Parse CSV from string.
///
/// The first line is the header, lines start with `#` are ignored.
pub fn parse_csv<D>(s: &str) -> Result<Vec<D>, Error>
where
    D: DeserializeOwned,
{
    ReaderBuilder::new()
        .comment(Some(b'#'))
        .from_reader(Cursor::new(s))
        .deserialize()
        .collect()
}

/// Dump CSV to string.
pub fn dump_csv<'a, C, S>(c: C) -> Result<String, Box<dyn std::error::Error>>
where
    C: Into<std::borrow::Cow<'a, [S]>>,
    S: Serialize + Clone + 'a,
{
    let mut w = Writer::from_writer(Vec::new());
    let v = c.into().into_owned();
    v.into_iter().try_for_each(|c| w.serialize(c))?;
    Ok(String::from_utf8(w.into_inner()?)?)
}

impl Locus {
    /// Records of the solvable samples.
    pub fn to_rows(&self) -> Vec<LocusRow> {
        self.iter()
            .map(|(input, coupler, output, [x, y])| LocusRow { input, coupler, output, x, y })
            .collect()
    }

    /// Dump the solvable samples with the header `input,coupler,output,x,y`.
    pub fn to_csv(&self) -> Result<String, Box<dyn std::error::Error>> {
        dump_csv(self.to_rows())
    }
}

#[test]
fn csv_records() {
    use crate::{sweep, Branch, CouplerPoint, LinkageSpec};
    let spec = LinkageSpec::example();
    let locus = sweep(&spec, &CouplerPoint::example(), Branch::Open, 90.).unwrap();
    let s = locus.to_csv().unwrap();
    assert!(s.starts_with("input,coupler,output,x,y\n"));
    assert_eq!(s.lines().count(), locus.len() + 1);
    let rows = parse_csv::<LocusRow>(&s).unwrap();
    assert_eq!(rows, locus.to_rows());
}
