//! Invocation pipeline for sqlpkg
//!
//! Ties the pieces together: an `Invocation` goes in, the final argument list
//! for SqlPackage comes out. Exports additionally run through the table
//! filter, which may query the source database.

use log::debug;

use crate::argument::CliArgument;
use crate::assembler::{build_export_arguments, build_import_arguments};
use crate::catalog::TableCatalog;
use crate::error::SqlPkgResult;
use crate::invocation::{Action, Invocation};
use crate::table_filter::resolve_table_data;

/// Final argument list for the external tool
///
/// Actions other than export and import are passed through unchanged.
pub async fn prepare<C: TableCatalog>(
    invocation: &Invocation,
    catalog: &C,
) -> SqlPkgResult<Vec<CliArgument>> {
    match &invocation.action {
        Action::Export => {
            let working = build_export_arguments(invocation)?;
            resolve_table_data(&invocation.original, working, &invocation.source, catalog).await
        }
        Action::Import => build_import_arguments(invocation),
        action @ (Action::Other(_) | Action::Missing) => {
            debug!("Passing arguments through unchanged for action {action}");
            Ok(invocation.original.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::ConnectionDescriptor;
    use crate::keys;
    use crate::lookup::ArgumentLookup;

    struct FixedCatalog;

    impl TableCatalog for FixedCatalog {
        async fn list_user_tables(&self, source: &ConnectionDescriptor) -> SqlPkgResult<Vec<String>> {
            assert_eq!(source.server_name, "db1");
            Ok(vec![
                "[dbo].[Orders]".to_string(),
                "[dbo].[OrderItems]".to_string(),
                "[sales].[Orders]".to_string(),
            ])
        }
    }

    #[tokio::test]
    async fn test_export_with_wildcard_exclusion() {
        let invocation = Invocation::from_tokens([
            "/a:Export",
            "/ssn:db1",
            "/sdn:shop",
            "/tf:shop.bacpac",
            "/p:ExcludeTableData=[dbo].[Order*]",
        ])
        .unwrap();

        let working = prepare(&invocation, &FixedCatalog).await.unwrap();
        assert_eq!(working[0].value, "Export");
        assert_eq!(working.values_of(keys::TABLE_DATA), vec!["[sales].[Orders]"]);
        assert!(!working.has_argument(keys::EXCLUDE_TABLE_DATA));
    }

    #[tokio::test]
    async fn test_other_actions_pass_through() {
        let invocation =
            Invocation::from_tokens(["/a:Extract", "/ssn:db1", "/TargetFile:shop.dacpac"]).unwrap();
        let working = prepare(&invocation, &FixedCatalog).await.unwrap();
        assert_eq!(working, invocation.original);
    }
}
