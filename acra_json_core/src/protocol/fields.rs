/**
 * Crash-report field identifiers.
 *
 * Every value the host framework collects about a crash is keyed by one of
 * these identifiers. The canonical textual name of a field (e.g.
 * `"STACK_TRACE"`) is what ends up as the JSON key when no mapping
 * overrides it, and is also the spelling accepted in configuration files.
 */
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

// ---------------------------------------------------------------------------
// ReportField
// ---------------------------------------------------------------------------

/*
 * Declares the enum together with its canonical names so the serde
 * representation, `as_str()` and `FromStr` can never drift apart.
 */
macro_rules! report_fields {
    ($( $(#[$doc:meta])* $variant:ident => $name:literal, )+) => {
        /**
         * A kind of value carried by a crash report.
         *
         * Serializes to (and parses from) its SCREAMING_SNAKE_CASE name.
         */
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ReportField {
            $(
                $(#[$doc])*
                $variant,
            )+
        }

        impl ReportField {
            /// Every known field, in declaration order.
            pub const ALL: &'static [ReportField] = &[$(ReportField::$variant),+];

            /// Canonical name, e.g. `ReportField::StackTrace` -> `"STACK_TRACE"`.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(ReportField::$variant => $name,)+
                }
            }
        }

        impl FromStr for ReportField {
            type Err = UnknownField;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(ReportField::$variant),)+
                    other => Err(UnknownField(other.to_string())),
                }
            }
        }
    };
}

report_fields! {
    /// Unique identifier of this report.
    ReportId => "REPORT_ID",
    /// Application version as a single display string.
    AppVersion => "APP_VERSION",
    AppVersionCode => "APP_VERSION_CODE",
    AppVersionName => "APP_VERSION_NAME",
    PackageName => "PACKAGE_NAME",
    /// Base path of the application's private file folder.
    FilePath => "FILE_PATH",
    PhoneModel => "PHONE_MODEL",
    AndroidVersion => "ANDROID_VERSION",
    /// Build properties of the device.
    Build => "BUILD",
    Brand => "BRAND",
    Product => "PRODUCT",
    TotalMemSize => "TOTAL_MEM_SIZE",
    AvailableMemSize => "AVAILABLE_MEM_SIZE",
    /// Key/value pairs added by the application itself.
    CustomData => "CUSTOM_DATA",
    StackTrace => "STACK_TRACE",
    InitialConfiguration => "INITIAL_CONFIGURATION",
    CrashConfiguration => "CRASH_CONFIGURATION",
    Display => "DISPLAY",
    UserComment => "USER_COMMENT",
    UserAppStartDate => "USER_APP_START_DATE",
    UserCrashDate => "USER_CRASH_DATE",
    DumpsysMeminfo => "DUMPSYS_MEMINFO",
    Dropbox => "DROPBOX",
    Logcat => "LOGCAT",
    Eventslog => "EVENTSLOG",
    Radiolog => "RADIOLOG",
    /// `true` when the report was sent without any user interaction.
    IsSilent => "IS_SILENT",
    DeviceId => "DEVICE_ID",
    InstallationId => "INSTALLATION_ID",
    UserEmail => "USER_EMAIL",
    DeviceFeatures => "DEVICE_FEATURES",
    Environment => "ENVIRONMENT",
    SettingsSystem => "SETTINGS_SYSTEM",
    SettingsSecure => "SETTINGS_SECURE",
    SharedPreferences => "SHARED_PREFERENCES",
    ApplicationLog => "APPLICATION_LOG",
    MediaCodecList => "MEDIA_CODEC_LIST",
    ThreadDetails => "THREAD_DETAILS",
    UserIp => "USER_IP",
}

impl fmt::Display for ReportField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/*
 * Serialized through the canonical name rather than as a unit variant, so
 * the field works as a map key in every format (TOML tables included).
 */
impl Serialize for ReportField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ReportField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldVisitor;

        impl Visitor<'_> for FieldVisitor {
            type Value = ReportField;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a report field name such as \"STACK_TRACE\"")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<ReportField, E> {
                value.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(FieldVisitor)
    }
}

/// Returned by `ReportField::from_str` for a name outside the enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown report field `{0}`")]
pub struct UnknownField(pub String);

// ---------------------------------------------------------------------------
// Default field set
// ---------------------------------------------------------------------------

/**
 * Fields emitted when the configuration does not name any.
 *
 * The order here is the order of keys in the resulting JSON document.
 */
pub const DEFAULT_REPORT_FIELDS: &[ReportField] = &[
    ReportField::ReportId,
    ReportField::AppVersionCode,
    ReportField::AppVersionName,
    ReportField::PackageName,
    ReportField::FilePath,
    ReportField::PhoneModel,
    ReportField::Brand,
    ReportField::Product,
    ReportField::AndroidVersion,
    ReportField::Build,
    ReportField::TotalMemSize,
    ReportField::AvailableMemSize,
    ReportField::CustomData,
    ReportField::IsSilent,
    ReportField::StackTrace,
    ReportField::InitialConfiguration,
    ReportField::CrashConfiguration,
    ReportField::Display,
    ReportField::UserComment,
    ReportField::UserEmail,
    ReportField::UserAppStartDate,
    ReportField::UserCrashDate,
    ReportField::DumpsysMeminfo,
    ReportField::Logcat,
    ReportField::InstallationId,
    ReportField::DeviceFeatures,
    ReportField::Environment,
    ReportField::SharedPreferences,
    ReportField::SettingsSystem,
    ReportField::SettingsSecure,
];
