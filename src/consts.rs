/// Number of days in a week, and columns in the day grid
pub const DAYS_IN_WEEK: usize = 7;

/// Rows in the day grid before near-month weeks are trimmed
pub const DAY_GRID_ROWS: usize = 6;

/// Cells in the day grid (6 weeks)
pub const DAY_GRID_CELLS: usize = DAYS_IN_WEEK * DAY_GRID_ROWS;

/// Months in a year, the cell count of the month grid
pub const MONTHS_IN_YEAR: u8 = 12;

/// Largest row or column count accepted for month and year grids
pub const MAX_GRID_DIMENSION: u8 = 12;

/// First hour rendered as PM
pub const FIRST_PM_HOUR: u32 = 12;

/// Hours added or removed when toggling the meridiem
pub const HOURS_PER_MERIDIEM: i64 = 12;

/// Format used to project a value onto its time of day
pub const TIME_ONLY_FORMAT: &str = "HH:mm:ss";

/// Display text of an invalid date
pub const INVALID_DATE: &str = "Invalid Date";

/// Separator used when several values share one input text
pub const VALUES_SEPARATOR: char = '|';

/// Separator placed between values when joining them for display
pub const VALUES_JOINER: &str = " | ";

// Per-kind value formats
pub const DEFAULT_DAY_FORMAT: &str = "DD-MM-YYYY";
pub const DEFAULT_DAY_TIME_FORMAT: &str = "DD-MM-YYYY HH:mm:ss";
pub const DEFAULT_TIME_FORMAT: &str = "HH:mm:ss";
pub const DEFAULT_MONTH_FORMAT: &str = "MMM, YYYY";
pub const DEFAULT_YEAR_FORMAT: &str = "YYYY";

// Header and button formats
pub const DEFAULT_MONTH_HEADER_FORMAT: &str = "MMM, YYYY";
pub const DEFAULT_YEAR_HEADER_FORMAT: &str = "YYYY";
pub const DEFAULT_WEEK_DAY_FORMAT: &str = "ddd";
pub const DEFAULT_DAY_BTN_FORMAT: &str = "DD";
pub const DEFAULT_MONTH_BTN_FORMAT: &str = "MMM";
pub const DEFAULT_YEAR_BTN_FORMAT: &str = "YYYY";

// Time-select display parts
pub const DEFAULT_HOURS_12_FORMAT: &str = "hh";
pub const DEFAULT_HOURS_24_FORMAT: &str = "HH";
pub const DEFAULT_MERIDIEM_FORMAT: &str = "A";
pub const DEFAULT_MINUTES_FORMAT: &str = "mm";
pub const DEFAULT_SECONDS_FORMAT: &str = "ss";
pub const DEFAULT_TIME_SEPARATOR: &str = ":";

/// Default locale name
pub const DEFAULT_LOCALE: &str = "en";

/// Default month-grid row count (3 rows of 4 months)
pub const DEFAULT_MONTH_ROWS: u8 = 3;
/// Default year-grid rows
pub const DEFAULT_YEAR_ROWS: u8 = 4;
/// Default year-grid columns
pub const DEFAULT_YEAR_COLS: u8 = 5;
/// Default step of the secondary month-view navigation, in years
pub const DEFAULT_MULTIPLE_YEARS_NAVIGATE_BY: u8 = 10;
/// Default minute and second step of the time select
pub const DEFAULT_INTERVAL: u8 = 1;
