// crates/certmap-core/src/model.rs

//! # Row schema
//!
//! The dataset arrives with arbitrary column headers; projection pins
//! each parsed record onto this fixed logical schema by exact header
//! match. Every field is optional and `None` is the single null
//! sentinel: projection never stores an empty string, so downstream
//! equality checks against "no filter" stay unambiguous.

use crate::sheet::{Cell, SheetRecord};

pub const HEADER_CITY: &str = "City";
pub const HEADER_STATE: &str = "State";
pub const HEADER_COMPANY: &str = "Company Name";
pub const HEADER_CATEGORY: &str = "Category";
pub const HEADER_STATUS: &str = "Status";
pub const HEADER_YEAR: &str = "Year of Certification";
pub const HEADER_POC: &str = "PoC";
pub const HEADER_GP_TEAM: &str = "GP Team";

/// One certified-company record. Immutable after load; the full set is
/// cached once for the session lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub city: Option<Cell>,
    pub state: Option<Cell>,
    pub company: Option<Cell>,
    pub category: Option<Cell>,
    pub status: Option<Cell>,
    pub year: Option<Cell>,
    pub poc: Option<Cell>,
    pub gp_team: Option<Cell>,
}

impl Row {
    /// Project a parsed sheet record onto the fixed schema.
    ///
    /// A record missing a named header yields `None` for that field;
    /// unrecognized extra columns are ignored.
    pub fn from_record(record: &SheetRecord) -> Self {
        let field = |header: &str| record.get(header).cloned();
        Row {
            city: field(HEADER_CITY),
            state: field(HEADER_STATE),
            company: field(HEADER_COMPANY),
            category: field(HEADER_CATEGORY),
            status: field(HEADER_STATUS),
            year: field(HEADER_YEAR),
            poc: field(HEADER_POC),
            gp_team: field(HEADER_GP_TEAM),
        }
    }
}

/// The seven filterable fields, in control order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetField {
    Status,
    Category,
    City,
    State,
    Poc,
    GpTeam,
    Year,
}

impl FacetField {
    pub const ALL: [FacetField; 7] = [
        FacetField::Status,
        FacetField::Category,
        FacetField::City,
        FacetField::State,
        FacetField::Poc,
        FacetField::GpTeam,
        FacetField::Year,
    ];

    /// Human label, used by the CLI and for control captions.
    pub fn label(self) -> &'static str {
        match self {
            FacetField::Status => "Status",
            FacetField::Category => "Category",
            FacetField::City => "City",
            FacetField::State => "State",
            FacetField::Poc => "PoC",
            FacetField::GpTeam => "GP Team",
            FacetField::Year => "Year",
        }
    }
}

impl Row {
    /// Cell view of a filterable field.
    pub fn field(&self, field: FacetField) -> Option<&Cell> {
        match field {
            FacetField::Status => self.status.as_ref(),
            FacetField::Category => self.category.as_ref(),
            FacetField::City => self.city.as_ref(),
            FacetField::State => self.state.as_ref(),
            FacetField::Poc => self.poc.as_ref(),
            FacetField::GpTeam => self.gp_team.as_ref(),
            FacetField::Year => self.year.as_ref(),
        }
    }
}
