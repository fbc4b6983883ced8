//! Client-side narrowing of an already fetched property list.
//!
//! Criteria keep the raw text the user typed. Text is parsed when the
//! filter runs; anything empty or unparsable places no constraint.

use crate::models::Property;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// User-entered filter configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Exact owning company
    pub company_id: Option<String>,
    /// Inclusive lower price bound
    pub min_price: Option<String>,
    /// Inclusive upper price bound
    pub max_price: Option<String>,
    /// Minimum number of bedrooms
    pub bedrooms: Option<String>,
    /// Minimum number of bathrooms
    pub bathrooms: Option<String>,
    /// Case-insensitive substring of the city
    pub city: Option<String>,
}

/// Form field a criterion is entered through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    CompanyId,
    MinPrice,
    MaxPrice,
    Bedrooms,
    Bathrooms,
    City,
}

impl FilterCriteria {
    pub fn is_unset(&self) -> bool {
        self.parsed() == ParsedCriteria::default()
    }

    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let slot = match field {
            FilterField::CompanyId => &mut self.company_id,
            FilterField::MinPrice => &mut self.min_price,
            FilterField::MaxPrice => &mut self.max_price,
            FilterField::Bedrooms => &mut self.bedrooms,
            FilterField::Bathrooms => &mut self.bathrooms,
            FilterField::City => &mut self.city,
        };
        *slot = Some(value.into());
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Typed view of the criteria, dropping whatever does not parse
    pub fn parsed(&self) -> ParsedCriteria {
        ParsedCriteria {
            company_id: self.company_id.as_deref().and_then(parse_int),
            min_price: self.min_price.as_deref().and_then(parse_float),
            max_price: self.max_price.as_deref().and_then(parse_float),
            bedrooms: self.bedrooms.as_deref().and_then(parse_int),
            bathrooms: self.bathrooms.as_deref().and_then(parse_int),
            city: self
                .city
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .map(str::to_lowercase),
        }
    }
}

/// Criteria after parsing; `None` means no constraint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedCriteria {
    pub company_id: Option<i64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<i64>,
    pub city: Option<String>,
}

impl ParsedCriteria {
    /// All set predicates must hold
    pub fn matches(&self, property: &Property) -> bool {
        if let Some(company_id) = self.company_id {
            if property.company_id != company_id {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if property.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if property.price > max {
                return false;
            }
        }
        if let Some(bedrooms) = self.bedrooms {
            if i64::from(property.bedrooms) < bedrooms {
                return false;
            }
        }
        if let Some(bathrooms) = self.bathrooms {
            if i64::from(property.bathrooms) < bathrooms {
                return false;
            }
        }
        if let Some(city) = &self.city {
            if !property.city.to_lowercase().contains(city.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Narrow `all` to the records matching `criteria`, keeping source order
pub fn apply_filters(all: &[Property], criteria: &FilterCriteria) -> Vec<Property> {
    let parsed = criteria.parsed();
    let filtered: Vec<Property> = all.iter().filter(|p| parsed.matches(p)).cloned().collect();
    debug!("Filtered {} properties down to {}", all.len(), filtered.len());
    filtered
}

/// Integer criterion; a decimal entry is truncated toward zero
fn parse_int(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<i64>().ok().or_else(|| {
        parse_float(raw)
            .filter(|f| f.abs() < i64::MAX as f64)
            .map(|f| f.trunc() as i64)
    })
}

fn parse_float(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|f| f.is_finite())
}
