//! Tenant column visibility and record projection.
//!
//! Every field that can leave the service is listed in [`EmployeeField`];
//! a tenant's allow-list is intersected with that closed schema.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

use super::employee::EmployeeRecord;

/// Fields a search response may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmployeeField {
    Id,
    FirstName,
    LastName,
    ContactInfo,
    Location,
    Company,
    Department,
    Position,
    Status,
}

impl EmployeeField {
    pub const ALL: [EmployeeField; 9] = [
        EmployeeField::Id,
        EmployeeField::FirstName,
        EmployeeField::LastName,
        EmployeeField::ContactInfo,
        EmployeeField::Location,
        EmployeeField::Company,
        EmployeeField::Department,
        EmployeeField::Position,
        EmployeeField::Status,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeField::Id => "id",
            EmployeeField::FirstName => "first_name",
            EmployeeField::LastName => "last_name",
            EmployeeField::ContactInfo => "contact_info",
            EmployeeField::Location => "location",
            EmployeeField::Company => "company",
            EmployeeField::Department => "department",
            EmployeeField::Position => "position",
            EmployeeField::Status => "status",
        }
    }
}

impl fmt::Display for EmployeeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EmployeeField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmployeeField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("column_name", format!("unknown column '{}'", s))
            })
    }
}

/// A projected field value, always taken from the display form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
    Null,
}

impl From<Option<&str>> for FieldValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(FieldValue::Null, |s| FieldValue::Text(s.to_string()))
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Integer(n) => serializer.serialize_i64(*n),
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Null => serializer.serialize_none(),
        }
    }
}

impl EmployeeRecord {
    /// Reads one field in display form.
    pub fn field_value(&self, field: EmployeeField) -> FieldValue {
        match field {
            EmployeeField::Id => FieldValue::Integer(self.id.as_i64()),
            EmployeeField::FirstName => self.first_name.as_deref().into(),
            EmployeeField::LastName => self.last_name.as_deref().into(),
            EmployeeField::ContactInfo => self.contact_info.as_deref().into(),
            EmployeeField::Location => self.location.display().into(),
            EmployeeField::Company => self.company.display().into(),
            EmployeeField::Department => self.department.display().into(),
            EmployeeField::Position => self.position.display().into(),
            EmployeeField::Status => FieldValue::Text(self.status.as_str().to_string()),
        }
    }
}

/// Ordered per-tenant allow-list of projectable fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnVisibility {
    columns: Vec<EmployeeField>,
}

impl ColumnVisibility {
    /// Builds an allow-list, keeping first occurrences in order.
    pub fn new(columns: impl IntoIterator<Item = EmployeeField>) -> Self {
        let mut unique: Vec<EmployeeField> = Vec::new();
        for column in columns {
            if !unique.contains(&column) {
                unique.push(column);
            }
        }
        Self { columns: unique }
    }

    /// Builds an allow-list from configured column names.
    ///
    /// Returns the list together with the names that are not part of the
    /// projectable schema; those are never projected.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> (Self, Vec<String>) {
        let mut fields = Vec::new();
        let mut unknown = Vec::new();
        for name in names {
            match name.parse::<EmployeeField>() {
                Ok(field) => fields.push(field),
                Err(_) => unknown.push(name.to_string()),
            }
        }
        (Self::new(fields), unknown)
    }

    pub fn columns(&self) -> &[EmployeeField] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Projects a record onto the allow-list.
    pub fn project(&self, record: &EmployeeRecord) -> ProjectedEmployee {
        ProjectedEmployee {
            fields: self
                .columns
                .iter()
                .map(|field| (*field, record.field_value(*field)))
                .collect(),
        }
    }
}

/// A record reduced to a tenant's visible columns, serialized as a JSON
/// object in allow-list order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectedEmployee {
    fields: Vec<(EmployeeField, FieldValue)>,
}

impl ProjectedEmployee {
    pub fn get(&self, field: EmployeeField) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ProjectedEmployee {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::directory::{EmployeeStatus, Facet};
    use crate::domain::foundation::{EmployeeId, OrganizationId};

    fn alice() -> EmployeeRecord {
        EmployeeRecord::new(EmployeeId::new(1), OrganizationId::new(1))
            .with_name("Alice", "Nguyen")
            .with_contact_info("alice@example.com")
            .with_facet(Facet::Location, "Hà Nội")
            .with_facet(Facet::Position, "Backend Developer")
            .with_status(EmployeeStatus::Active)
    }

    #[test]
    fn field_names_roundtrip_through_from_str() {
        for field in EmployeeField::ALL {
            assert_eq!(field.as_str().parse::<EmployeeField>().unwrap(), field);
        }
    }

    #[test]
    fn search_columns_are_not_projectable() {
        assert!("location_search".parse::<EmployeeField>().is_err());
        assert!("organization_id".parse::<EmployeeField>().is_err());
    }

    #[test]
    fn projection_only_emits_allowed_fields() {
        let visibility =
            ColumnVisibility::new([EmployeeField::FirstName, EmployeeField::Position]);
        let projected = visibility.project(&alice());

        assert_eq!(projected.len(), 2);
        assert_eq!(
            projected.get(EmployeeField::FirstName),
            Some(&FieldValue::Text("Alice".to_string()))
        );
        assert!(projected.get(EmployeeField::ContactInfo).is_none());
    }

    #[test]
    fn projection_uses_display_form() {
        let visibility = ColumnVisibility::new([EmployeeField::Location]);
        let projected = visibility.project(&alice());
        assert_eq!(
            projected.get(EmployeeField::Location),
            Some(&FieldValue::Text("Hà Nội".to_string()))
        );
    }

    #[test]
    fn empty_allow_list_projects_empty_mapping() {
        let projected = ColumnVisibility::default().project(&alice());
        assert!(projected.is_empty());
        assert_eq!(serde_json::to_string(&projected).unwrap(), "{}");
    }

    #[test]
    fn serializes_in_allow_list_order_with_nulls() {
        let visibility = ColumnVisibility::new([
            EmployeeField::Status,
            EmployeeField::Id,
            EmployeeField::Company,
        ]);
        let json = serde_json::to_string(&visibility.project(&alice())).unwrap();
        assert_eq!(json, r#"{"status":"ACTIVE","id":1,"company":null}"#);
    }

    #[test]
    fn from_names_splits_unknown_columns_and_dedupes() {
        let (visibility, unknown) =
            ColumnVisibility::from_names(["first_name", "salary", "first_name", "position"]);
        assert_eq!(
            visibility.columns(),
            &[EmployeeField::FirstName, EmployeeField::Position]
        );
        assert_eq!(unknown, vec!["salary".to_string()]);
    }
}
