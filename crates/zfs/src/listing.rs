//! Parsing of `zfs list -H -p -o name,used` output

use snappy_core::{CatalogError, ListedSnapshot};

/// Parse tab-separated `name<TAB>used` lines
///
/// Rows without an `@` are datasets rather than snapshots and are skipped.
/// Any other deviation from the format is an error.
pub fn parse_listing(output: &str) -> Result<Vec<ListedSnapshot>, CatalogError> {
    let mut snapshots = Vec::new();

    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let malformed = || CatalogError::MalformedListing {
            line: line.to_string(),
        };

        let mut fields = line.split('\t');
        let (Some(name), Some(used), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(malformed());
        };

        if !name.contains('@') {
            continue;
        }

        let used_bytes = used.trim().parse::<u64>().map_err(|_| malformed())?;
        snapshots.push(ListedSnapshot::new(name, used_bytes));
    }

    Ok(snapshots)
}
