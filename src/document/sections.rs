//! Download sections of the configuration document.
//! Each section is always rendered: either enabled with the
//! user values, or disabled with its default values.
use std::fmt::{Display, Formatter, Result};
use std::str::FromStr;
use thiserror::Error;

use super::{switch, write_field, write_line};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NamingConventionError {
    #[error("invalid file naming preference \"{0}\", expecting 0 (long), 1 (short) or 2 (both)")]
    Invalid(String),
}

/// File naming preference, for products that exist
/// with both long and short (V2) file names.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NamingConvention {
    /// Modern (V3+) long file names only
    Long,
    /// Short (V2) file names only
    Short,
    /// Both long and short file names
    Both,
}

impl Display for NamingConvention {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Long => write!(f, "0"),
            Self::Short => write!(f, "1"),
            Self::Both => write!(f, "2"),
        }
    }
}

impl FromStr for NamingConvention {
    type Err = NamingConventionError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Self::Long),
            "1" => Ok(Self::Short),
            "2" => Ok(Self::Both),
            _ => Err(NamingConventionError::Invalid(s.to_string())),
        }
    }
}

/// Hours to download, for hourly or sub-daily products:
/// `start` first hour, then `count` consecutive hours.
/// For example start=1, count=3 is 01, 02 and 03.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HourRange {
    /// First hour (00, 01, 02..)
    pub start: u8,
    /// Number of consecutive hours
    pub count: u8,
}

impl HourRange {
    pub const fn new(start: u8, count: u8) -> Self {
        Self { start, count }
    }
    fn write(&self, f: &mut Formatter, suffix: &str) -> Result {
        write_field(
            f,
            &format!("sHH4{}", suffix),
            format!("{:02}", self.start),
            "   6th: Start hour (00, 01, 02, ...);",
        )?;
        write_field(
            f,
            &format!("nHH4{}", suffix),
            self.count,
            "   7th: The consecutive hours, i.e., '01  3' denotes 01, 02, and 03;",
        )
    }
}

fn naming_comment(products: &str) -> String {
    format!(
        "Valid only for {} with long name, 0: long name, 1: short name, 2: long and short name",
        products
    )
}

/// GNSS observation data (RINEX OBS)
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    pub enabled: bool,
    /// "daily", "hourly", "highrate", "30s", "5s" or "1s"
    pub obs_type: String,
    /// "igs", "mgex", "igm", "cut", "hk", "ngs", "epn", "pbo" or "chi"
    pub from: String,
    /// "all" or site list file name
    pub list: String,
    pub hours: HourRange,
    pub naming: NamingConvention,
}

impl Default for Observation {
    fn default() -> Self {
        Self {
            enabled: false,
            obs_type: "daily".to_string(),
            from: "mgex".to_string(),
            list: "site_mgex.list".to_string(),
            hours: HourRange::new(1, 1),
            naming: NamingConvention::Short,
        }
    }
}

impl Observation {
    /// Builds an enabled [Observation] section
    pub fn enabled(obs_type: &str, from: &str, list: &str) -> Self {
        Self {
            enabled: true,
            obs_type: obs_type.to_string(),
            from: from.to_string(),
            list: list.to_string(),
            ..Default::default()
        }
    }
}

impl Display for Observation {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write_line(f, "getObs:", Some(" GNSS observation data downloading option"))?;
        write_field(f, "opt4obs", switch(self.enabled), "   1st(opt4obs): (0: off  1: on);")?;
        write_field(
            f,
            "obsType",
            &self.obs_type,
            "   2nd(obsType): 'daily', 'hourly', 'highrate', '30s', '5s', or '1s';",
        )?;
        write_field(
            f,
            "obsFrom",
            &self.from,
            "   3rd: 'igs', 'mgex', 'igm', 'cut', 'hk', 'ngs', 'epn', 'pbo', or 'chi';",
        )?;
        write_field(
            f,
            "obsList",
            &self.list,
            "   4th: 'all' or the file name of the site list;",
        )?;
        self.hours.write(f, "obs")?;
        write_field(
            f,
            "l2s4obs",
            self.naming,
            &format!("   8th: {}", naming_comment("the observation files")),
        )
    }
}

/// Broadcast ephemeris (RINEX NAV)
#[derive(Clone, Debug, PartialEq)]
pub struct Navigation {
    pub enabled: bool,
    /// "daily" or "hourly"
    pub nav_type: String,
    /// "gps", "glo", "bds", "gal", "qzs", "irn", "mixed3", "mixed4" or "all"
    pub system: String,
    /// Combination center: "igs", "dlr", "ign", "gop" or "wrd"
    pub from: String,
    /// Site list, only used by hourly files
    pub list: String,
    pub hours: HourRange,
    pub naming: NamingConvention,
}

impl Default for Navigation {
    fn default() -> Self {
        Self {
            enabled: false,
            nav_type: "daily".to_string(),
            system: "mixed3".to_string(),
            from: "igs".to_string(),
            list: "site_mgex.list".to_string(),
            hours: HourRange::new(1, 2),
            naming: NamingConvention::Both,
        }
    }
}

impl Navigation {
    /// Builds an enabled [Navigation] section
    pub fn enabled(nav_type: &str, system: &str, from: &str) -> Self {
        Self {
            enabled: true,
            nav_type: nav_type.to_string(),
            system: system.to_string(),
            from: from.to_string(),
            ..Default::default()
        }
    }
}

impl Display for Navigation {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write_line(
            f,
            "getNav:",
            Some(" Various broadcast ephemeris downloading option"),
        )?;
        write_field(f, "opt4nav", switch(self.enabled), "   1st: (0: off  1: on);")?;
        write_field(f, "navType", &self.nav_type, "   2nd: 'daily' or 'hourly';")?;
        write_field(
            f,
            "navSys",
            &self.system,
            "   3rd: 'gps', 'glo', 'bds', 'gal', 'qzs', 'irn', 'mixed3', 'mixed4', or 'all';",
        )?;
        write_field(
            f,
            "navFrom",
            &self.from,
            "   4th: Analysis center (i.e., 'igs', 'dlr', 'ign', 'gop', or 'wrd') that carries out the combination of broadcast ephemeris for mixed navigation data. From CDDIS or WHU FTP, 'igs' and 'dlr' can be downloaded, and from IGN, 'igs' and 'ign' can be downloaded. The downloading of 'gop' and/or 'wrd' is via the other FTP addresses;",
        )?;
        write_field(
            f,
            "navList",
            &self.list,
            "   5th: ONLY the site list file name is valid if the 2nd item is 'hourly';",
        )?;
        self.hours.write(f, "nav")?;
        write_field(
            f,
            "l2s4nav",
            self.naming,
            &format!("   8th: {}", naming_comment("the navigation files")),
        )
    }
}

/// Final/rapid/ultra-rapid precise orbits (SP3) and clocks
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitClock {
    pub enabled: bool,
    /// Analysis center(s), for example "igs" or "cod+gfz_m"
    pub from: String,
    pub hours: HourRange,
    pub naming: NamingConvention,
}

impl Default for OrbitClock {
    fn default() -> Self {
        Self {
            enabled: false,
            from: "igs".to_string(),
            hours: HourRange::new(1, 2),
            naming: NamingConvention::Both,
        }
    }
}

impl OrbitClock {
    /// Builds an enabled [OrbitClock] section
    pub fn enabled(from: &str) -> Self {
        Self {
            enabled: true,
            from: from.to_string(),
            ..Default::default()
        }
    }
}

impl Display for OrbitClock {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write_line(
            f,
            "getOrbClk:",
            Some(" Satellite final/rapid/ultra-rapid precise orbit and clock downloading option"),
        )?;
        write_field(f, "opt4oc", switch(self.enabled), "   1st: (0: off  1: on);")?;
        write_field(f, "ocFrom", &self.from, "   2nd: Analysis center")?;
        self.hours.write(f, "oc")?;
        write_field(
            f,
            "l2s4oc",
            self.naming,
            &format!(
                "   8th: {}",
                naming_comment("the precise orbit and clock files")
            ),
        )
    }
}

/// Earth rotation/orientation parameters
#[derive(Clone, Debug, PartialEq)]
pub struct Eop {
    pub enabled: bool,
    /// Analysis center, final or ultra-rapid
    pub from: String,
    pub hours: HourRange,
    pub naming: NamingConvention,
}

impl Default for Eop {
    fn default() -> Self {
        Self {
            enabled: false,
            from: "igs".to_string(),
            hours: HourRange::new(1, 2),
            naming: NamingConvention::Both,
        }
    }
}

impl Eop {
    /// Builds an enabled [Eop] section
    pub fn enabled(from: &str) -> Self {
        Self {
            enabled: true,
            from: from.to_string(),
            ..Default::default()
        }
    }
}

impl Display for Eop {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write_line(
            f,
            "getEop:",
            Some(" Earth rotation/orientation parameter (ERP/EOP) downloading option"),
        )?;
        write_field(f, "opt4eop", switch(self.enabled), "   1st: (0: off  1: on);")?;
        write_field(f, "eopFrom", &self.from, "   2nd: Analysis center")?;
        self.hours.write(f, "eop")?;
        write_field(
            f,
            "l2s4eop",
            self.naming,
            &format!("   8th: {}", naming_comment("the EOP files")),
        )
    }
}

/// ORBEX satellite attitude
#[derive(Clone, Debug, PartialEq)]
pub struct Orbex {
    pub enabled: bool,
    pub from: String,
}

impl Default for Orbex {
    fn default() -> Self {
        Self {
            enabled: false,
            from: "cod".to_string(),
        }
    }
}

impl Orbex {
    /// Builds an enabled [Orbex] section
    pub fn enabled(from: &str) -> Self {
        Self {
            enabled: true,
            from: from.to_string(),
        }
    }
}

impl Display for Orbex {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write_line(
            f,
            "getObx:",
            Some(
                " ORBEX (ORBit EXchange format) for satellite attitude information downloading option",
            ),
        )?;
        write_field(f, "opt4obx", switch(self.enabled), "   1st: (0: off  1: on);")?;
        write_field(f, "obxFrom", &self.from, "   2nd: Analysis center")
    }
}

/// Signal bias products
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BiasKind {
    /// Differential code/signal bias (DCB/DSB)
    Dsb,
    /// Observable-specific signal bias (OSB)
    Osb,
}

impl BiasKind {
    fn key(&self) -> &'static str {
        match self {
            Self::Dsb => "dsb",
            Self::Osb => "osb",
        }
    }
    fn description(&self) -> &'static str {
        match self {
            Self::Dsb => "Differential code/signal bias (DCB/DSB)",
            Self::Osb => "Observable-specific signal bias (OSB)",
        }
    }
}

/// DSB or OSB download section
#[derive(Clone, Debug, PartialEq)]
pub struct Bias {
    pub kind: BiasKind,
    pub enabled: bool,
    pub from: String,
}

impl Bias {
    /// Builds a disabled [Bias] section
    pub fn new(kind: BiasKind) -> Self {
        Self {
            kind,
            enabled: false,
            from: "cod".to_string(),
        }
    }
    /// Builds an enabled [Bias] section
    pub fn enabled(kind: BiasKind, from: &str) -> Self {
        Self {
            kind,
            enabled: true,
            from: from.to_string(),
        }
    }
}

impl Display for Bias {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let key = self.kind.key();
        let mut title = key.to_string();
        title[..1].make_ascii_uppercase();
        write_line(
            f,
            &format!("get{}:", title),
            Some(&format!(" {} downloading option", self.kind.description())),
        )?;
        write_field(
            f,
            &format!("opt4{}", key),
            switch(self.enabled),
            "   1st: (0: off  1: on);",
        )?;
        write_field(
            f,
            &format!("{}From", key),
            &self.from,
            "   2nd: Analysis center",
        )
    }
}

/// IGS weekly SINEX solutions
#[derive(Clone, Debug, PartialEq)]
pub struct Sinex {
    pub enabled: bool,
    pub naming: NamingConvention,
}

impl Default for Sinex {
    fn default() -> Self {
        Self {
            enabled: false,
            naming: NamingConvention::Short,
        }
    }
}

impl Display for Sinex {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write_line(f, "getSnx:", Some(" IGS weekly SINEX downloading option"))?;
        write_field(f, "opt4snx", switch(self.enabled), "   1st: (0: off  1: on)")?;
        write_field(
            f,
            "l2s4snx",
            self.naming,
            &format!("   2nd: {}", naming_comment("IGS weekly SINEX file")),
        )
    }
}

/// Global ionosphere maps (GIM)
#[derive(Clone, Debug, PartialEq)]
pub struct Ionosphere {
    pub enabled: bool,
    /// Analysis center(s), for example "cod" or "cas+cod+igs"
    pub from: String,
    pub naming: NamingConvention,
}

impl Default for Ionosphere {
    fn default() -> Self {
        Self {
            enabled: false,
            from: "igs".to_string(),
            naming: NamingConvention::Short,
        }
    }
}

impl Ionosphere {
    /// Builds an enabled [Ionosphere] section
    pub fn enabled(from: &str) -> Self {
        Self {
            enabled: true,
            from: from.to_string(),
            ..Default::default()
        }
    }
}

impl Display for Ionosphere {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write_line(
            f,
            "getIon:",
            Some(" Global ionosphere map (GIM) downloading option"),
        )?;
        write_field(f, "opt4ion", switch(self.enabled), "   1st: (0: off  1: on);")?;
        write_field(f, "ionFrom", &self.from, "   2nd: Analysis center")?;
        write_field(
            f,
            "l2s4ion",
            self.naming,
            &format!("   3rd: {}", naming_comment("GIM file")),
        )
    }
}

/// Rate of TEC index
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roti {
    pub enabled: bool,
}

impl Display for Roti {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write_line(
            f,
            "getRoti:",
            Some(" Rate of TEC index (ROTI) downloading option"),
        )?;
        write_field(f, "opt4rot", switch(self.enabled), "   1st: (0: off  1: on)")
    }
}

/// CODE/IGS tropospheric products
#[derive(Clone, Debug, PartialEq)]
pub struct Troposphere {
    pub enabled: bool,
    /// "igs" or "cod"
    pub from: String,
    /// "all" or site list file name, only used with "igs"
    pub list: String,
    pub naming: NamingConvention,
}

impl Default for Troposphere {
    fn default() -> Self {
        Self {
            enabled: false,
            from: "cod".to_string(),
            list: "site_trp.list".to_string(),
            naming: NamingConvention::Short,
        }
    }
}

impl Troposphere {
    /// Builds an enabled [Troposphere] section
    pub fn enabled(from: &str, list: &str) -> Self {
        Self {
            enabled: true,
            from: from.to_string(),
            list: list.to_string(),
            ..Default::default()
        }
    }
}

impl Display for Troposphere {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write_line(
            f,
            "getTrp:",
            Some(" CODE/IGS tropospheric product downloading option"),
        )?;
        write_field(f, "opt4trp", switch(self.enabled), "   1st: (0:off  1:on);")?;
        write_field(
            f,
            "trpFrom",
            &self.from,
            "   2nd: Analysis center (i.e., 'igs' or 'cod');",
        )?;
        write_field(
            f,
            "trpList",
            &self.list,
            "   3rd: the file name of site.list. NOTE: It is valid ONLY when the 2nd item 'igs' is set.",
        )?;
        write_field(
            f,
            "l2s4trp",
            self.naming,
            &format!("   4th: {}", naming_comment("the troposphere files")),
        )
    }
}

/// ANTEX antenna phase center corrections
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Antex {
    pub enabled: bool,
}

impl Display for Antex {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write_line(
            f,
            "getAtx:",
            Some(" ANTEX format antenna phase center correction downloading option"),
        )?;
        write_field(f, "opt4atx", switch(self.enabled), "   1st: (0: off  1: on)")
    }
}
