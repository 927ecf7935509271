//! Names and fixed values shared across the ingest pipeline.

/// Display name of the ingest module. Also the attribution source stamped on
/// every attribute the module writes.
pub const MODULE_NAME: &str = "Mac OSX FSEvents Module";

/// One-line description shown by hosts that list modules.
pub const MODULE_DESCRIPTION: &str = "Get the FSEvents data";

/// Module version reported to the host.
pub const MODULE_VERSION: &str = "1.0";

/// Subdirectory of the case temp root that holds per-data-source scratch dirs.
pub const SCRATCH_DIR_NAME: &str = "MacFSEvents";

/// Case label passed to the decoder with `-c` when none is configured.
pub const DEFAULT_CASE_LABEL: &str = "Autopsy";

/// Suffix of the database the decoder writes into its output directory.
/// The full file name is `<case label>` followed by this suffix.
pub const DECODER_OUTPUT_SUFFIX: &str = "_FSEvents-Parsed_Records_DB.sqlite";

/// Decoder executable looked up in the module directory on Windows.
pub const WINDOWS_DECODER_EXECUTABLE: &str = "fseparser_v2.1.exe";

/// Decoder executable looked up in the module directory everywhere else.
pub const UNIX_DECODER_EXECUTABLE: &str = "FSEParser_V2.1";

/// File name of the catalog database shipped next to the module.
pub const CATALOG_FILE_NAME: &str = "fsevents_sql.db3";

/// Catalog table listing evidence types and their extraction queries.
pub const CATALOG_TABLE: &str = "extracted_content_sql";

/// Default filename glob for the locator.
pub const DEFAULT_NAME_PATTERN: &str = "*";

/// Default parent-path fragment for the locator.
pub const DEFAULT_PARENT_PATTERN: &str = ".fseventsd";

/// Bookkeeping file inside every `.fseventsd` directory. Not an event log.
pub const FSEVENTSD_UUID: &str = "fseventsd-uuid";

/// Names the locator never returns.
pub const STRUCTURAL_NAMES: [&str; 3] = [".", "..", FSEVENTSD_UUID];

/// Any source file whose name contains this marker is skipped by the mapper.
pub const SLACK_MARKER: &str = "slack";

/// Columns every catalog query must return.
pub const COLUMN_FILENAME: &str = "filename";
pub const COLUMN_MASK: &str = "mask";
pub const COLUMN_SOURCE: &str = "source";
pub const COLUMN_DATES: &str = "OTHER_DATES";

/// Event categories written into a freshly created catalog.
pub const FSEVENT_CATEGORIES: [&str; 20] = [
    "FolderEvent",
    "Mount",
    "Unmount",
    "EndOfTransaction",
    "LastHardLinkRemoved",
    "HardLink",
    "SymbolicLink",
    "FileEvent",
    "PermissionChange",
    "ExtendedAttrModified",
    "ExtendedAttrRemoved",
    "DocumentRevisioning",
    "Created",
    "Removed",
    "InodeMetaMod",
    "Renamed",
    "Modified",
    "Exchange",
    "FinderInfoMod",
    "FolderCreated",
];

/// Table the default catalog queries read from in the decoder output.
pub const DECODER_EVENTS_TABLE: &str = "fsevents";
