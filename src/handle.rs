//! Table handles: `@handle.table`, `.table` or `@handle`.
//!
//! Table commands (copy, truncate, drop) take their arguments in this form.
//! A handle without a table names a whole source; a table without a handle
//! refers to the active source.

use std::fmt;

use nom::{
    IResult,
    bytes::complete::take_while,
    character::complete::{char, satisfy},
    combinator::{all_consuming, opt, recognize},
    sequence::{pair, preceded},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{SlqError, SlqResult};

/// Longest identifier accepted by the strictest supported dialect (Postgres).
const MAX_TABLE_NAME_LEN: usize = 63;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableHandle {
    /// Source handle including the leading `@`.
    pub handle: Option<String>,
    pub table: Option<String>,
}

/// Parse an identifier: a letter or underscore, then letters, digits, underscores.
fn parse_ident(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

fn parse_handle(input: &str) -> IResult<&str, &str> {
    recognize(pair(char('@'), parse_ident))(input)
}

fn parse_table(input: &str) -> IResult<&str, &str> {
    preceded(char('.'), parse_ident)(input)
}

impl TableHandle {
    pub fn parse(input: &str) -> SlqResult<Self> {
        let input = input.trim();
        let (_, (handle, table)) = all_consuming(pair(opt(parse_handle), opt(parse_table)))(input)
            .map_err(|_| SlqError::InvalidHandle(input.to_string()))?;

        if handle.is_none() && table.is_none() {
            return Err(SlqError::InvalidHandle(input.to_string()));
        }

        Ok(Self {
            handle: handle.map(str::to_string),
            table: table.map(str::to_string),
        })
    }

    /// Fill in a missing handle from `active` and require a table.
    pub fn resolve(&self, active: Option<&str>) -> SlqResult<(String, String)> {
        let table = self
            .table
            .clone()
            .ok_or_else(|| SlqError::InvalidHandle(format!("{} doesn't specify a table", self)))?;
        let handle = match (&self.handle, active) {
            (Some(h), _) => h.clone(),
            (None, Some(a)) => a.to_string(),
            (None, None) => {
                return Err(SlqError::InvalidHandle(format!(
                    "{} doesn't specify a handle and there's no active source",
                    self
                )));
            }
        };
        Ok((handle, table))
    }
}

impl fmt::Display for TableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(h) = &self.handle {
            f.write_str(h)?;
        }
        if let Some(t) = &self.table {
            write!(f, ".{}", t)?;
        }
        Ok(())
    }
}

/// `base__<8 hex chars>`, truncating `base` so the result stays a legal
/// identifier length.
pub fn unique_table_name(base: &str) -> String {
    let suffix = format!("__{}", &Uuid::new_v4().simple().to_string()[..8]);
    let max_base = MAX_TABLE_NAME_LEN - suffix.len();

    let mut cut = base.len().min(max_base);
    while !base.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}{}", &base[..cut], suffix)
}

/// Source and destination of a table copy within one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyPlan {
    pub handle: String,
    pub from: String,
    pub to: String,
}

/// Work out a table copy from one or two handles.
///
/// Without a destination table the copy gets a unique `<table>_copy__xxxxxxxx`
/// name. Copies across sources and onto the same table are rejected.
pub fn plan_copy(
    src: &TableHandle,
    dst: Option<&TableHandle>,
    active: Option<&str>,
) -> SlqResult<CopyPlan> {
    let (handle, from) = src.resolve(active)?;

    let (dst_handle, to) = match dst {
        Some(d) => {
            let dst_handle = d.handle.clone().unwrap_or_else(|| handle.clone());
            let to = d
                .table
                .clone()
                .unwrap_or_else(|| unique_table_name(&format!("{}_copy", from)));
            (dst_handle, to)
        }
        None => (handle.clone(), unique_table_name(&format!("{}_copy", from))),
    };

    if dst_handle != handle {
        return Err(SlqError::precondition(format!(
            "table copy only works within one source, but got {}.{} --> {}.{}",
            handle, from, dst_handle, to
        )));
    }
    if from == to {
        return Err(SlqError::precondition(format!(
            "cannot copy table {}.{} to itself",
            handle, from
        )));
    }

    Ok(CopyPlan { handle, from, to })
}
