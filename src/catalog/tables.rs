//! Built-in category tables.

use super::CheckEntry;
use super::Container::{Db, Env, Ext, Headers, Php};
use super::ValidatorKind::*;

/// Interpreter settings that keep long-running requests and uploads stable.
pub const STABILITY: &[CheckEntry] = &[
    CheckEntry::new("phpVersion", Env)
        .recommended("7.1.x, 7.2.x (dev)")
        .kind(Version)
        .label("PHP")
        .background(),
    CheckEntry::new("error_reporting", Php)
        .recommended("E_ALL & ~E_NOTICE")
        .kind(ErrorReporting)
        .background(),
    CheckEntry::new("output_buffering", Php)
        .recommended("On")
        .kind(OnOffInt)
        .background(),
    CheckEntry::new("max_execution_time", Php)
        .recommended("600")
        .kind(Greater)
        .background(),
    CheckEntry::new("max_input_time", Php)
        .recommended("600")
        .kind(Greater)
        .background(),
    CheckEntry::new("default_socket_timeout", Php)
        .recommended("600")
        .kind(Greater)
        .background(),
    CheckEntry::new("memory_limit", Php)
        .recommended("1 GB")
        .kind(GreaterMb)
        .background(),
    CheckEntry::new("log_errors", Php)
        .recommended("On")
        .kind(OnOff)
        .background(),
    CheckEntry::new("file_uploads", Php)
        .recommended("On")
        .kind(OnOff)
        .background(),
    CheckEntry::new("short_open_tag", Php)
        .recommended("On")
        .kind(OnOff)
        .background(),
    CheckEntry::new("post_max_size", Php)
        .recommended("50 MB")
        .kind(GreaterMb)
        .background(),
    CheckEntry::new("upload_max_filesize", Php)
        .recommended("100 MB")
        .kind(GreaterMb)
        .background(),
    CheckEntry::new("max_input_vars", Php)
        .recommended("10000")
        .kind(Greater)
        .background(),
    CheckEntry::new("zlib.output_compression", Php)
        .recommended("Off")
        .kind(OnOff)
        .background(),
    CheckEntry::new("session.auto_start", Php)
        .recommended("Off")
        .kind(OnOff)
        .background(),
    CheckEntry::new("session.gc_maxlifetime", Php)
        .recommended("21600")
        .kind(Greater)
        .background(),
    CheckEntry::new("session.gc_divisor", Php)
        .recommended("500")
        .kind(Greater)
        .background(),
    CheckEntry::new("session.gc_probability", Php)
        .recommended("1")
        .kind(Equal)
        .background(),
    // webmail client
    CheckEntry::new("mbstring.func_overload", Php)
        .recommended("Off")
        .kind(OnOff)
        .background(),
    CheckEntry::new("date.timezone", Php).kind(TimeZone).background(),
    CheckEntry::new("allow_url_fopen", Php)
        .recommended("On")
        .kind(OnOff)
        .background(),
    // CSV import
    CheckEntry::new("auto_detect_line_endings", Php)
        .recommended("On")
        .kind(OnOff)
        .background(),
];

/// Transport, session and response-header hardening.
pub const SECURITY: &[CheckEntry] = &[
    CheckEntry::new("HTTPS", Env).recommended("On").kind(OnOff),
    CheckEntry::new("public_html", Env).recommended("On").kind(OnOff),
    CheckEntry::new("display_errors", Php)
        .recommended("Off")
        .kind(OnOff)
        .demo_exempt()
        .background(),
    CheckEntry::new(".htaccess", Php).recommended("On").kind(Htaccess),
    CheckEntry::new("session.use_strict_mode", Php)
        .recommended("On")
        .kind(OnOff)
        .background(),
    CheckEntry::new("session.use_trans_sid", Php)
        .recommended("Off")
        .kind(OnOff)
        .background(),
    CheckEntry::new("session.cookie_httponly", Php)
        .recommended("On")
        .kind(OnOff)
        .background(),
    CheckEntry::new("session.use_only_cookies", Php)
        .recommended("On")
        .kind(OnOff)
        .background(),
    CheckEntry::new("session.cookie_secure", Php)
        .recommended("?")
        .kind(CookieSecure)
        .background(),
    CheckEntry::new("expose_php", Php)
        .recommended("Off")
        .kind(OnOff)
        .background(),
    CheckEntry::detached("session_regenerate_id")
        .recommended("On")
        .kind(SessionRegenerate)
        .background(),
    CheckEntry::new("Header: Server", Headers)
        .recommended("")
        .kind(Header),
    CheckEntry::new("Header: X-Powered-By", Headers)
        .recommended("")
        .kind(Header),
    CheckEntry::new("Header: X-Frame-Options", Headers)
        .recommended("SAMEORIGIN")
        .kind(Header),
    CheckEntry::new("Header: X-XSS-Protection", Headers)
        .recommended("1; mode=block")
        .kind(Header),
    CheckEntry::new("Header: X-Content-Type-Options", Headers)
        .recommended("nosniff")
        .kind(Header),
    CheckEntry::new("Header: X-Robots-Tag", Headers)
        .recommended("none")
        .kind(Header),
    CheckEntry::new("Header: X-Permitted-Cross-Domain-Policies", Headers)
        .recommended("none")
        .kind(Header),
    CheckEntry::new("Header: Expect-CT", Headers)
        .recommended("enforce; max-age=3600")
        .kind(Header),
    CheckEntry::new("Header: Referrer-Policy", Headers)
        .recommended("no-referrer")
        .kind(Header),
    CheckEntry::new("Header: Strict-Transport-Security", Headers)
        .recommended("max-age=31536000; includeSubDomains; preload")
        .kind(Header),
];

const fn required_module(name: &'static str) -> CheckEntry {
    CheckEntry::new(name, Ext)
        .kind(ExtExist)
        .module(name, true)
        .background()
}

const fn optional_module(name: &'static str) -> CheckEntry {
    CheckEntry::new(name, Ext)
        .kind(ExtExist)
        .module(name, false)
        .background()
}

/// Optional modules the application depends on.
pub const LIBRARIES: &[CheckEntry] = &[
    required_module("imap"),
    required_module("pdo_mysql"),
    required_module("mysqlnd"),
    required_module("openssl"),
    required_module("curl"),
    required_module("gd"),
    required_module("pcre"),
    required_module("xml"),
    required_module("json"),
    required_module("session"),
    required_module("dom"),
    required_module("zip"),
    required_module("mbstring"),
    required_module("soap"),
    required_module("fileinfo"),
    required_module("iconv"),
    optional_module("exif"),
    optional_module("ldap"),
    CheckEntry::new("OPcache", Ext)
        .kind(FnExist)
        .function("opcache_get_configuration", false)
        .background(),
    optional_module("apcu"),
    CheckEntry::new("allExt", Ext)
        .kind(AllExt)
        .label("EXTENSIONS")
        .background(),
];

const fn db(name: &'static str) -> CheckEntry {
    CheckEntry::new(name, Db)
}

/// Database engine variables and connection metadata.
pub const DATABASE: &[CheckEntry] = &[
    db("driver").recommended("mysql").kind(Equal),
    db("serverVersion"),
    db("clientVersion"),
    db("connectionStatus"),
    db("serverInfo"),
    db("innodb_lock_wait_timeout").recommended("600").kind(Greater),
    db("wait_timeout").recommended("600").kind(Greater),
    db("interactive_timeout").recommended("600").kind(Greater),
    db("sql_mode")
        .recommended("")
        .kind(NotIn)
        .forbidden(&["STRICT_ALL_TABLES", "STRICT_TRANS_TABLE"]),
    db("max_allowed_packet").recommended("10 MB").kind(GreaterMb),
    db("log_error"),
    db("max_connections"),
    db("bulk_insert_buffer_size"),
    db("key_buffer_size"),
    db("thread_cache_size"),
    db("query_cache_size"),
    db("tmp_table_size"),
    db("max_heap_table_size"),
    db("innodb_file_per_table").recommended("On"),
    db("innodb_stats_on_metadata").recommended("Off"),
    db("innodb_buffer_pool_instances"),
    db("innodb_buffer_pool_size"),
    db("innodb_log_file_size"),
    db("innodb_io_capacity_max"),
    db("tx_isolation"),
    db("transaction_isolation"),
    db("character_set_server").recommended("utf8").kind(Equal),
    db("character_set_database").recommended("utf8").kind(Equal),
    db("character_set_client").recommended("utf8").kind(Equal),
    db("character_set_connection").recommended("utf8").kind(Equal),
    db("character_set_results").recommended("utf8").kind(Equal),
    db("character_set_system"),
    db("character_set_filesystem"),
];

/// Opcode cache tuning and debug tooling that should be off in production.
pub const PERFORMANCE: &[CheckEntry] = &[
    // A loaded debugger is reported as "On" and fails; absent is "Off".
    CheckEntry::new("xdebug", Ext)
        .recommended("Off")
        .kind(ExtNotExist)
        .module("xdebug", false)
        .background(),
    CheckEntry::new("opcache.enable", Php)
        .recommended("On")
        .kind(OnOff)
        .background(),
    CheckEntry::new("opcache.enable_cli", Php)
        .recommended("On")
        .kind(OnOff)
        .background(),
    CheckEntry::new("opcache.max_accelerated_files", Php)
        .recommended("40000")
        .kind(Greater)
        .background(),
    CheckEntry::new("opcache.interned_strings_buffer", Php)
        .recommended("100")
        .kind(Greater)
        .background(),
    CheckEntry::new("opcache.validate_timestamps", Php)
        .recommended("1")
        .kind(Equal)
        .background(),
    CheckEntry::new("opcache.revalidate_freq", Php)
        .recommended("30")
        .kind(Equal)
        .background(),
    CheckEntry::new("opcache.save_comments", Php)
        .recommended("0")
        .kind(Equal)
        .background(),
    CheckEntry::new("opcache.memory_consumption", Php).background(),
];
