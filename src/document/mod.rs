//! GOOD configuration document.
//!
//! The document is a line oriented, YAML compatible, `key : value` text
//! with trailing `#` comments. The downloader expects every section to be
//! present, so [Document] always renders all of them, in a fixed order,
//! whatever the user requested.
use hifitime::{Epoch, Unit};
use std::fmt::{Display, Formatter, Result};

mod sections;

pub use sections::{
    Antex, Bias, BiasKind, Eop, HourRange, Ionosphere, NamingConvention, Navigation, Observation,
    OrbitClock, Orbex, Roti, Sinex, Troposphere,
};

use crate::platform::Platform;

/// Name of the temporary document, within the data directory
pub const FILE_NAME: &str = "GOOD_temporary.yaml";

/// Trailing comments start on this column
const COMMENT_COLUMN: usize = 34;

/// Fixed sub-directories, relative to the main directory
const SUB_DIRECTORIES: [(&str, &str, &str); 12] = [
    ("obsDir", "obs", "The sub-directory of RINEX format observation files"),
    ("navDir", "nav", "The sub-directory of RINEX format broadcast ephemeris files"),
    ("orbDir", "orb", "The sub-directory of SP3 format precise ephemeris files"),
    ("clkDir", "clk", "The sub-directory of RINEX format precise clock files"),
    ("eopDir", "eop", "The sub-directory of earth rotation/orientation parameter (EOP) files"),
    (
        "obxDir",
        "obx",
        "The sub-directory of MGEX final/rapid and/or CNES real-time ORBEX (ORBit EXchange format) files",
    ),
    (
        "biaDir",
        "bia",
        "The sub-directory of CODE/MGEX differential code/signal bias (DCB/DSB), MGEX observable-specific signal bias (OSB), and/or CNES real-time OSB files",
    ),
    ("snxDir", "snx", "The sub-directory of SINEX format IGS weekly solution files"),
    ("ionDir", "ion", "The sub-directory of CODE/IGS global ionosphere map (GIM) files"),
    ("ztdDir", "ztd", "The sub-directory of CODE/IGS tropospheric product files"),
    (
        "tblDir",
        "tbl",
        "The sub-directory of table files (i.e., ANTEX, ocean tide loading files, etc.) for processing",
    ),
    ("logDir", "log", "The sub-directory of log file"),
];

/// Writes `content`, followed by `comment` aligned on [COMMENT_COLUMN]
pub(crate) fn write_line(f: &mut Formatter, content: &str, comment: Option<&str>) -> Result {
    match comment {
        Some(comment) if content.len() < COMMENT_COLUMN => {
            writeln!(f, "{:<width$}#{}", content, comment, width = COMMENT_COLUMN)
        },
        Some(comment) => writeln!(f, "{} #{}", content, comment),
        None => writeln!(f, "{}", content),
    }
}

/// Renders a boolean option as `0` (off) or `1` (on)
pub(crate) fn switch(enabled: bool) -> u8 {
    if enabled {
        1
    } else {
        0
    }
}

/// Writes one indented section field
pub(crate) fn write_field(
    f: &mut Formatter,
    key: &str,
    value: impl Display,
    comment: &str,
) -> Result {
    write_line(f, &format!("  {:<7}: {}", key, value), Some(comment))
}

/// Writes one top level setting
fn write_setting(f: &mut Formatter, key: &str, value: impl Display, comment: &str) -> Result {
    write_line(f, &format!("{:<14}: {}", key, value), Some(comment))
}

/// Processing period. Fields are kept verbatim, as provided by the user.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcTime {
    /// 4-digit year
    pub year: String,
    /// Day of year
    pub doy: String,
    /// Number of consecutive days
    pub ndays: String,
}

impl ProcTime {
    pub fn new(year: &str, doy: &str, ndays: &str) -> Self {
        Self {
            year: year.to_string(),
            doy: doy.to_string(),
            ndays: ndays.to_string(),
        }
    }
}

impl From<Epoch> for ProcTime {
    /// Single day period, on the (UTC) day of given [Epoch]
    fn from(epoch: Epoch) -> Self {
        let (year, month, day, _, _, _, _) = epoch.to_gregorian_utc();
        let midnight = Epoch::from_gregorian_utc_at_midnight(year, month, day);
        let new_year = Epoch::from_gregorian_utc_at_midnight(year, 1, 1);
        let doy = (midnight - new_year).to_unit(Unit::Day).round() as u16 + 1;
        Self {
            year: year.to_string(),
            doy: doy.to_string(),
            ndays: "1".to_string(),
        }
    }
}

impl Display for ProcTime {
    /// Formats as "year doy ndays" setting (mode 2)
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "2  {}  {}  {}", self.year, self.doy, self.ndays)
    }
}

/// FTP download master switch
#[derive(Clone, Debug, PartialEq)]
pub struct Ftp {
    pub enabled: bool,
    /// FTP archive: "cddis", "ign" or "whu"
    pub archive: String,
}

impl Default for Ftp {
    fn default() -> Self {
        Self {
            enabled: false,
            archive: "cddis".to_string(),
        }
    }
}

impl Ftp {
    /// Builds an enabled [Ftp] setup
    pub fn enabled(archive: &str) -> Self {
        Self {
            enabled: true,
            archive: archive.to_string(),
        }
    }
}

/// Transfer options that apply to all products
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TransferOptions {
    /// Also download the day before and after, for precise orbit and clock products
    pub adjacent_days: bool,
    /// Merge three consecutive SP3 files into one
    pub merge_sp3: bool,
    /// Print wget output
    pub wget_verbose: bool,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            adjacent_days: false,
            merge_sp3: false,
            wget_verbose: true,
        }
    }
}

/// Complete GOOD configuration document
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    /// Root directory of all observations and products, verbatim
    pub main_dir: String,
    pub platform: Platform,
    pub time: ProcTime,
    pub transfer: TransferOptions,
    pub ftp: Ftp,
    pub obs: Observation,
    pub nav: Navigation,
    pub orbclk: OrbitClock,
    pub eop: Eop,
    pub obx: Orbex,
    pub dsb: Bias,
    pub osb: Bias,
    pub snx: Sinex,
    pub ion: Ionosphere,
    pub roti: Roti,
    pub trop: Troposphere,
    pub atx: Antex,
}

impl Document {
    /// Builds a new [Document] where all downloads are disabled
    pub fn new(main_dir: &str, platform: Platform, time: ProcTime) -> Self {
        Self {
            main_dir: main_dir.to_string(),
            platform,
            time,
            transfer: TransferOptions::default(),
            ftp: Ftp::default(),
            obs: Observation::default(),
            nav: Navigation::default(),
            orbclk: OrbitClock::default(),
            eop: Eop::default(),
            obx: Orbex::default(),
            dsb: Bias::new(BiasKind::Dsb),
            osb: Bias::new(BiasKind::Osb),
            snx: Sinex::default(),
            ion: Ionosphere::default(),
            roti: Roti::default(),
            trop: Troposphere::default(),
            atx: Antex::default(),
        }
    }
    /// Applies a single hour range to all hourly capable products
    pub fn set_hours(&mut self, hours: HourRange) {
        self.obs.hours = hours;
        self.nav.hours = hours;
        self.orbclk.hours = hours;
        self.eop.hours = hours;
    }
    /// Applies a single file naming preference to all products
    pub fn set_naming(&mut self, naming: NamingConvention) {
        self.obs.naming = naming;
        self.nav.naming = naming;
        self.orbclk.naming = naming;
        self.eop.naming = naming;
        self.snx.naming = naming;
        self.ion.naming = naming;
        self.trop.naming = naming;
    }
    /// Returns the path where this document is to be stored
    pub fn path(&self) -> std::path::PathBuf {
        self.platform.join(&self.main_dir, FILE_NAME)
    }
    fn write_directories(&self, f: &mut Formatter) -> Result {
        writeln!(
            f,
            "# The root/main directory of GNSS observations and products  -------------------"
        )?;
        writeln!(f, "{:<14}: {}", "mainDir", self.main_dir)?;
        writeln!(
            f,
            "# The sub-directories of GNSS observations and products, which inherit the path of 'mainDir'"
        )?;
        writeln!(f, "#   i.e., 'orbDir' = 'mainDir' + 'orbDir'")?;
        for (key, dir, comment) in SUB_DIRECTORIES.iter() {
            write_setting(f, key, dir, &format!(" {}", comment))?;
        }
        write_setting(
            f,
            "3partyDir",
            self.platform.thirdparty_dir(),
            " The sub-directory where third-party softwares (i.e., 'wget', 'gzip', 'crx2rnx' etc) are stored",
        )
    }
    fn write_time(&self, f: &mut Formatter) -> Result {
        writeln!(
            f,
            "# Time settings ----------------------------------------------------------------"
        )?;
        write_setting(
            f,
            "procTime",
            &self.time,
            " The setting of start time for processing, which should be set to '1 year month day ndays' or '2 year doy ndays' or '3 week dow ndays'. NOTE: doy = day of year; week = GPS week; dow = day within week",
        )
    }
    fn write_transfer(&self, f: &mut Formatter) -> Result {
        write_setting(
            f,
            "minusAdd1day",
            switch(self.transfer.adjacent_days),
            " (0: off  1: on) The setting of the day before and after the current day for precise satellite orbit and clock products downloading",
        )?;
        write_setting(
            f,
            "merge_sp3files",
            switch(self.transfer.merge_sp3),
            " (0: off  1: on) to merge three consecutive sp3 files into one file",
        )?;
        write_setting(
            f,
            "printInfoWget",
            switch(self.transfer.wget_verbose),
            " (0: off  1: on) Printing the information generated by 'wget'",
        )
    }
    fn write_ftp(&self, f: &mut Formatter) -> Result {
        writeln!(
            f,
            "# Handling of FTP downloading --------------------------------------------------"
        )?;
        write_line(
            f,
            "ftpDownloading:",
            Some(" The setting of the master switch for data downloading"),
        )?;
        write_field(f, "opt4ftp", switch(self.ftp.enabled), "   1st: (0:off  1:on);")?;
        write_field(
            f,
            "ftpArch",
            &self.ftp.archive,
            "   2nd: the FTP archive, i.e., cddis, ign, or whu.",
        )
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter) -> Result {
        writeln!(
            f,
            "# GAMP II: intelliGent Analysis system for Multi-sensor integrated navigation and Positioning v2.0"
        )?;
        writeln!(
            f,
            "#   This configuration is for GAMP II - GOOD (GNSS Observations and prOducts Downloader)"
        )?;
        writeln!(f)?;
        self.write_directories(f)?;
        writeln!(f)?;
        self.write_time(f)?;
        writeln!(f)?;
        self.write_transfer(f)?;
        writeln!(f)?;
        self.write_ftp(f)?;
        write!(f, "{}", self.obs)?;
        write!(f, "{}", self.nav)?;
        write!(f, "{}", self.orbclk)?;
        write!(f, "{}", self.eop)?;
        write!(f, "{}", self.obx)?;
        write!(f, "{}", self.dsb)?;
        write!(f, "{}", self.osb)?;
        write!(f, "{}", self.snx)?;
        write!(f, "{}", self.ion)?;
        write!(f, "{}", self.roti)?;
        write!(f, "{}", self.trop)?;
        write!(f, "{}", self.atx)
    }
}
