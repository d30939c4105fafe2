//! Sheet metadata parsing - row 0, cell 0 routing header

/// Rows 0-2 carry the field identifiers, titles and types; data starts at
/// row 3.
pub const HEADER_ROWS: usize = 3;

/// Parsed sheet routing metadata.
///
/// The header cell is a `#`-delimited record:
/// `exportName[#forServer[#forClient[#rowLimit]]]`. Only the name is
/// mandatory. When neither target flag is present both outputs are enabled;
/// an explicit flag enables its target only when it is exactly `"1"`.
/// A row limit of `0` (or an unparsable one) means unlimited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetMeta {
    pub export_name: String,
    pub for_server: bool,
    pub for_client: bool,
    pub row_limit: usize,
}

impl SheetMeta {
    pub fn parse(cell: &str) -> Self {
        let fields: Vec<&str> = cell.split('#').collect();

        let export_name = fields[0].to_string();
        let mut for_server = false;
        let mut for_client = false;
        if fields.len() == 1 {
            for_server = true;
            for_client = true;
        }
        if fields.len() > 1 && fields[1] == "1" {
            for_server = true;
        }
        if fields.len() > 2 && fields[2] == "1" {
            for_client = true;
        }
        let row_limit = fields
            .get(3)
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(0);

        Self {
            export_name,
            for_server,
            for_client,
            row_limit,
        }
    }

    /// A nonzero limit below [`HEADER_ROWS`] would cut into the structural
    /// header rows; the caller must abort the containing file.
    pub fn invalid_row_limit(&self) -> bool {
        self.row_limit > 0 && self.row_limit < HEADER_ROWS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_name_only_enables_both_targets() {
        let meta = SheetMeta::parse("Item");
        assert_eq!(meta.export_name, "Item");
        assert!(meta.for_server);
        assert!(meta.for_client);
        assert_eq!(meta.row_limit, 0);
    }

    #[test]
    fn test_explicit_server_only() {
        let meta = SheetMeta::parse("Item#1#0");
        assert!(meta.for_server);
        assert!(!meta.for_client);
    }

    #[test]
    fn test_server_flag_alone_disables_client() {
        let meta = SheetMeta::parse("Item#1");
        assert!(meta.for_server);
        assert!(!meta.for_client);
    }

    #[test]
    fn test_client_only() {
        let meta = SheetMeta::parse("Item#0#1");
        assert!(!meta.for_server);
        assert!(meta.for_client);
    }

    #[test]
    fn test_both_flags_off_means_skip() {
        let meta = SheetMeta::parse("Item#0#0");
        assert!(!meta.for_server);
        assert!(!meta.for_client);
    }

    #[test]
    fn test_row_limit_parsed() {
        let meta = SheetMeta::parse("Item#1#1#10");
        assert_eq!(meta.row_limit, 10);
        assert!(!meta.invalid_row_limit());
    }

    #[test]
    fn test_row_limit_unparsable_is_unlimited() {
        let meta = SheetMeta::parse("Item#1#1#abc");
        assert_eq!(meta.row_limit, 0);
        assert!(!meta.invalid_row_limit());
    }

    #[test]
    fn test_row_limit_below_headers_is_invalid() {
        assert!(SheetMeta::parse("Item#1#1#2").invalid_row_limit());
        assert!(SheetMeta::parse("Item#1#1#1").invalid_row_limit());
        assert!(!SheetMeta::parse("Item#1#1#3").invalid_row_limit());
        assert!(!SheetMeta::parse("Item#1#1#0").invalid_row_limit());
    }
}
