//! Column names of the Renewable Energy Planning Database extract.

pub const TECHNOLOGY_COLUMN: &str = "Technology Type";
pub const DEFAULT_TECHNOLOGY: &str = "Wind Onshore";

pub const REF_ID_COLUMN: &str = "Ref ID";
pub const SITE_NAME_COLUMN: &str = "Site Name";
pub const X_COLUMN: &str = "X-coordinate";
pub const Y_COLUMN: &str = "Y-coordinate";
pub const HEIGHT_COLUMN: &str = "Height of Turbines (m)";
pub const STATUS_COLUMN: &str = "Development Status (short)";

pub const GEOMETRY_LABEL: &str = "geometry";
pub const COORDINATES_LABEL: &str = "Coordinates";
pub const SEARCH_TEXT_LABEL: &str = "Search Text";

/// Cross-technology fields and internal references removed during cleaning.
///
/// Names missing from a given extract are skipped.
pub const DROPPED_COLUMNS: &[&str] = &[
    "Old Ref ID",
    "Record Last Updated (dd/mm/yyyy)",
    "Storage Type",
    "Storage Co-location REPD Ref ID",
    "Share Community Scheme",
    "CHP Enabled",
    "RO Banding (ROC/MWh)",
    "FiT Tariff (p/kWh)",
    "CfD Capacity (MW)",
    "Mounting Type for Solar",
    "Are they re-applying (New REPD Ref)",
    "Are they re-applying (Old REPD Ref)",
    "Offshore Wind Round",
    "Heat Network Ref",
    "Solar Site Area (sqm)",
    "Judicial Review",
    "Secretary of State Reference",
    "Type of Secretary of State Intervention",
];

/// Column header of the full extract, in file order.
pub const SOURCE_COLUMNS: &[&str] = &[
    "Old Ref ID",
    "Ref ID",
    "Record Last Updated (dd/mm/yyyy)",
    "Operator (or Applicant)",
    "Site Name",
    "Technology Type",
    "Storage Type",
    "Storage Co-location REPD Ref ID",
    "Installed Capacity (MWelec)",
    "Share Community Scheme",
    "CHP Enabled",
    "RO Banding (ROC/MWh)",
    "FiT Tariff (p/kWh)",
    "CfD Capacity (MW)",
    "Turbine Capacity (MW)",
    "No. of Turbines",
    "Height of Turbines (m)",
    "Mounting Type for Solar",
    "Development Status",
    "Development Status (short)",
    "Are they re-applying (New REPD Ref)",
    "Are they re-applying (Old REPD Ref)",
    "Address",
    "County",
    "Region",
    "Country",
    "Post Code",
    "X-coordinate",
    "Y-coordinate",
    "Planning Authority",
    "Planning Application Reference",
    "Appeal Reference",
    "Secretary of State Reference",
    "Type of Secretary of State Intervention",
    "Judicial Review",
    "Offshore Wind Round",
    "Planning Application Submitted",
    "Planning Application Withdrawn",
    "Planning Permission Refused",
    "Appeal Lodged",
    "Appeal Withdrawn",
    "Appeal Refused",
    "Appeal Granted",
    "Planning Permission Granted",
    "Secretary of State - Intervened",
    "Secretary of State - Refusal",
    "Secretary of State - Granted",
    "Planning Permission Expired",
    "Under Construction",
    "Operational",
    "Heat Network Ref",
    "Solar Site Area (sqm)",
];
