//! Logical column roles and the alias table used to find them.
//!
//! Source workbooks name the same field in different ways. Each [`Role`]
//! owns an ordered list of accepted header names; the first one present in
//! the sheet wins. Matching is exact and case-sensitive.

use crate::error::{ReportError, ReportResult};
use indexmap::IndexMap;
use std::fmt;

/// A logical field of a part record, independent of its header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Price,
    CompetitorPrice,
    Cost,
    Units,
    Part,
    Revenue,
}

impl Role {
    /// Every role, in resolution and display order.
    pub const ALL: [Role; 6] = [
        Role::Price,
        Role::CompetitorPrice,
        Role::Cost,
        Role::Units,
        Role::Part,
        Role::Revenue,
    ];

    /// Roles whose columns are coerced to numbers during cleaning.
    pub const NUMERIC: [Role; 4] = [Role::Price, Role::CompetitorPrice, Role::Cost, Role::Units];

    /// Accepted header names, most preferred first.
    #[must_use]
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Role::Price => &["Price", "price", "Unit_Price"],
            Role::CompetitorPrice => &[
                "Competitor_Price",
                "competitor_price",
                "Comp_Price",
                "Competitor price",
            ],
            Role::Cost => &["Cost", "cost", "Unit_Cost"],
            Role::Units => &["Units_Sold", "Units", "Quantity", "units_sold"],
            Role::Part => &["Part_Name", "Part", "Part_ID", "PartName"],
            Role::Revenue => &["Revenue", "revenue"],
        }
    }

    /// Whether a report can be produced at all without this role.
    #[must_use]
    pub fn is_mandatory(self) -> bool {
        matches!(self, Role::Price | Role::Part)
    }

    /// Snake-case name used in diagnostics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Price => "price",
            Role::CompetitorPrice => "competitor_price",
            Role::Cost => "cost",
            Role::Units => "units",
            Role::Part => "part",
            Role::Revenue => "revenue",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Return the first alias that names one of `columns`.
#[must_use]
pub fn resolve_column(columns: &[String], aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .find(|alias| columns.iter().any(|column| column == *alias))
        .map(|alias| (*alias).to_string())
}

/// Role to column assignment, built once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMapping {
    columns: IndexMap<Role, Option<String>>,
}

impl ColumnMapping {
    /// Resolve every role against the given header.
    #[must_use]
    pub fn resolve(columns: &[String]) -> Self {
        let columns = Role::ALL
            .into_iter()
            .map(|role| {
                let found = resolve_column(columns, role.aliases());
                tracing::debug!(role = %role, column = ?found, "resolved column");
                (role, found)
            })
            .collect();
        Self { columns }
    }

    /// Column name for a role, if one was found.
    #[must_use]
    pub fn get(&self, role: Role) -> Option<&str> {
        self.columns.get(&role).and_then(|c| c.as_deref())
    }

    /// Whether a role was resolved.
    #[must_use]
    pub fn has(&self, role: Role) -> bool {
        self.get(role).is_some()
    }

    /// Iterate roles in display order with their column, if any.
    pub fn iter(&self) -> impl Iterator<Item = (Role, Option<&str>)> {
        self.columns.iter().map(|(role, c)| (*role, c.as_deref()))
    }

    /// Fail unless price and part identifier were both found.
    pub fn require_mandatory(&self) -> ReportResult<()> {
        let roles: Vec<Role> = self
            .iter()
            .filter(|(role, column)| role.is_mandatory() && column.is_none())
            .map(|(role, _)| role)
            .collect();

        if roles.is_empty() {
            Ok(())
        } else {
            Err(ReportError::MissingRequiredColumns { roles })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn test_first_alias_wins() {
        let columns = header(&["Unit_Price", "price", "Part"]);
        assert_eq!(
            resolve_column(&columns, Role::Price.aliases()),
            Some("price".to_string())
        );
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let columns = header(&["PRICE", "part_name"]);
        assert_eq!(resolve_column(&columns, Role::Price.aliases()), None);
        assert_eq!(resolve_column(&columns, Role::Part.aliases()), None);
    }

    #[test]
    fn test_resolve_all_roles() {
        let columns = header(&[
            "Part_ID",
            "Price",
            "Comp_Price",
            "Unit_Cost",
            "Quantity",
            "Brand",
        ]);
        let mapping = ColumnMapping::resolve(&columns);

        assert_eq!(mapping.get(Role::Part), Some("Part_ID"));
        assert_eq!(mapping.get(Role::Price), Some("Price"));
        assert_eq!(mapping.get(Role::CompetitorPrice), Some("Comp_Price"));
        assert_eq!(mapping.get(Role::Cost), Some("Unit_Cost"));
        assert_eq!(mapping.get(Role::Units), Some("Quantity"));
        assert!(!mapping.has(Role::Revenue));
        assert!(mapping.require_mandatory().is_ok());

        let order: Vec<Role> = mapping.iter().map(|(role, _)| role).collect();
        assert_eq!(order, Role::ALL.to_vec());
    }

    #[test]
    fn test_missing_mandatory_roles_are_reported() {
        let mapping = ColumnMapping::resolve(&header(&["Cost", "Units"]));

        match mapping.require_mandatory() {
            Err(ReportError::MissingRequiredColumns { roles }) => {
                assert_eq!(roles, vec![Role::Price, Role::Part]);
            }
            other => panic!("expected missing columns, got {other:?}"),
        }
    }

    #[test]
    fn test_optional_roles_may_be_absent() {
        let mapping = ColumnMapping::resolve(&header(&["Part_Name", "Price"]));
        assert!(mapping.require_mandatory().is_ok());
        assert!(!mapping.has(Role::CompetitorPrice));
        assert!(!mapping.has(Role::Cost));
        assert!(!mapping.has(Role::Units));
    }
}
