use clap::{
    builder::TypedValueParser, error::ErrorKind, value_parser, Arg, ArgAction, ArgMatches,
    ColorChoice, Command,
};
use std::ffi::{OsStr, OsString};

use crate::document::{
    Bias, BiasKind, Document, Eop, Ftp, HourRange, Ionosphere, NamingConvention, Navigation,
    Observation, OrbitClock, Orbex, ProcTime, TransferOptions, Troposphere,
};
use crate::platform::Platform;

/// Every flag starts with this character.
/// A flag value may never start with it.
pub const FLAG_PREFIX: char = '-';

/// Below this number of arguments, we simply print the help
/// (`-exe <PATH> -datadir <DIR>` being the shortest valid command line).
pub const MIN_ARGS: usize = 4;

/// How the values of a flag are validated
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Validation {
    /// Verbatim value, that must not look like a flag
    Plain,
    /// Hour, from 0 to 24
    Hour,
    /// File naming preference (0, 1 or 2)
    Naming,
}

/// Describes one command line flag
pub struct Flag {
    /// Flag name, without prefix
    pub name: &'static str,
    /// One name per expected value: this is the flag arity
    pub values: &'static [&'static str],
    pub validation: Validation,
    pub required: bool,
    pub heading: &'static str,
    pub help: &'static str,
}

impl Flag {
    const fn new(
        name: &'static str,
        values: &'static [&'static str],
        heading: &'static str,
        help: &'static str,
    ) -> Self {
        Self {
            name,
            values,
            validation: Validation::Plain,
            required: false,
            heading,
            help,
        }
    }
    const fn required(mut self) -> Self {
        self.required = true;
        self
    }
    const fn validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }
    fn to_arg(&self) -> Arg {
        let arg = Arg::new(self.name)
            .long(self.name)
            .required(self.required)
            .help(self.help)
            .help_heading(self.heading);
        if self.values.is_empty() {
            return arg.action(ArgAction::SetTrue);
        }
        let arg = arg
            .action(ArgAction::Set)
            .num_args(self.values.len())
            .value_names(self.values.iter().copied());
        match self.validation {
            Validation::Plain => arg.value_parser(PlainValue),
            Validation::Hour => arg.value_parser(value_parser!(u8).range(0..=24)),
            Validation::Naming => arg.value_parser(value_parser!(NamingConvention)),
        }
    }
}

const SETUP: &str = "Setup";
const PRODUCTS: &str = "Products";
const TRANSFER: &str = "Transfer options";

/// Complete flag table
pub const FLAGS: [Flag; 21] = [
    Flag::new("exe", &["PATH"], SETUP, "Full path of the executable GOOD program").required(),
    Flag::new(
        "datadir",
        &["DIR"],
        SETUP,
        "Root directory of GNSS observations and products storage, i.e. 'D:\\data' on Windows or '/home/user/data' on Linux/Mac",
    )
    .required(),
    Flag::new(
        "time",
        &["YYYY", "DOY", "NDAYS"],
        SETUP,
        "4-digit year, day of year and number of consecutive days, i.e. '-time 2024 10 3'. Defaults to today (UTC), one day",
    ),
    Flag::new("ftp", &["ARCH"], SETUP, "FTP archive: 'cddis', 'whu' or 'ign'"),
    Flag::new(
        "obs",
        &["TYPE", "FROM", "LIST"],
        PRODUCTS,
        "Observation data. TYPE: 'daily', 'hourly', 'highrate', '30s', '5s' or '1s'; FROM: 'igs', 'mgex', 'igm', 'cut', 'hk', 'ngs', 'epn', 'pbo' or 'chi'; LIST: 'all' or site list file name. i.e. '-obs daily igs all'",
    ),
    Flag::new(
        "nav",
        &["TYPE", "SYS", "FROM"],
        PRODUCTS,
        "Broadcast ephemeris. TYPE: 'daily' or 'hourly'; SYS: 'gps', 'glo', 'bds', 'gal', 'qzs', 'irn', 'mixed3', 'mixed4' or 'all'; FROM: 'igs', 'dlr', 'ign', 'gop' or 'wrd'. i.e. '-nav daily mixed3 igs'",
    ),
    Flag::new(
        "orbclk",
        &["FROM"],
        PRODUCTS,
        "Final/rapid/ultra-rapid precise orbit and clock, i.e. 'igs', 'cod_m', 'igs_r', 'gfz_u', 'cnt' or combinations like 'igs+cod+cod_m'",
    ),
    Flag::new(
        "eop",
        &["FROM"],
        PRODUCTS,
        "Earth rotation/orientation parameters, i.e. 'igs' (final) or 'igs_u' (ultra-rapid)",
    ),
    Flag::new(
        "obx",
        &["FROM"],
        PRODUCTS,
        "ORBEX satellite attitude: 'cod', 'gfz', 'grg', 'whu', 'all' or 'cnt' (real-time)",
    ),
    Flag::new(
        "dsb",
        &["FROM"],
        PRODUCTS,
        "Differential code/signal bias (DCB/DSB): 'cod', 'cas' or 'all'",
    ),
    Flag::new(
        "osb",
        &["FROM"],
        PRODUCTS,
        "Observable-specific signal bias (OSB): 'cas', 'cod', 'gfz', 'grg', 'whu', 'all' or 'cnt' (real-time)",
    ),
    Flag::new("snx", &[], PRODUCTS, "IGS weekly SINEX"),
    Flag::new(
        "ion",
        &["FROM"],
        PRODUCTS,
        "Global ionosphere map (GIM), i.e. 'cod', 'cas+cod' or 'all'",
    ),
    Flag::new("roti", &[], PRODUCTS, "Rate of TEC index (ROTI)"),
    Flag::new(
        "trop",
        &["FROM", "LIST"],
        PRODUCTS,
        "CODE/IGS tropospheric products. FROM: 'igs' or 'cod'; LIST: 'all' or site list file name (only used with 'igs')",
    ),
    Flag::new("atx", &[], PRODUCTS, "ANTEX antenna phase center corrections"),
    Flag::new(
        "hh",
        &["START", "COUNT"],
        TRANSFER,
        "First hour and number of consecutive hours, for hourly observations/ephemeris and sub-daily orbit, clock and EOP products",
    )
    .validation(Validation::Hour),
    Flag::new(
        "l2s",
        &["0|1|2"],
        TRANSFER,
        "File naming preference for all products: 0 long names, 1 short names, 2 both",
    )
    .validation(Validation::Naming),
    Flag::new(
        "add1day",
        &[],
        TRANSFER,
        "Also download the day before and after, for precise orbit and clock products",
    ),
    Flag::new("merge", &[], TRANSFER, "Merge three consecutive SP3 files into one"),
    Flag::new("quiet", &[], TRANSFER, "Do not print wget output"),
];

/// Rejects values that look like a flag
fn plain_value(value: &str) -> Result<String, String> {
    if value.starts_with(FLAG_PREFIX) {
        Err(format!(
            "\"{}\" looks like a flag, while a value is expected",
            value
        ))
    } else {
        Ok(value.to_string())
    }
}

/// [plain_value] parser, that also rejects values that are not valid UTF-8,
/// naming the flag they were given to.
#[derive(Copy, Clone, Debug)]
struct PlainValue;

impl TypedValueParser for PlainValue {
    type Value = String;
    fn parse_ref(
        &self,
        cmd: &Command,
        arg: Option<&Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        if value.to_str().is_some() {
            return plain_value.parse_ref(cmd, arg, value);
        }
        let flag = arg.map(|arg| arg.to_string()).unwrap_or_default();
        let message = format!(
            "invalid UTF-8 value \"{}\" for '{}'\n",
            value.to_string_lossy(),
            flag
        );
        Err(clap::Error::raw(ErrorKind::InvalidUtf8, message).with_cmd(cmd))
    }
}

/// Converts historical single dash flags ("-obs") to their
/// double dash form ("--obs"). Anything else is left untouched.
fn normalize(arg: OsString) -> OsString {
    let name = match arg.to_str().and_then(|arg| arg.strip_prefix(FLAG_PREFIX)) {
        Some(name) => name,
        None => return arg,
    };
    if FLAGS.iter().any(|flag| flag.name == name) {
        OsString::from(format!("{0}{0}{1}", FLAG_PREFIX, name))
    } else {
        arg
    }
}

/// Returns true when the help is requested, anywhere on the command line.
/// This takes precedence over any other argument.
pub fn help_requested(args: &[OsString]) -> bool {
    args.iter().skip(1).any(|arg| *arg == "-h" || *arg == "--help")
}

pub struct Cli {
    /// Arguments passed by user
    matches: ArgMatches,
}

impl Cli {
    /// Builds the command line interface, from [FLAGS]
    pub fn command() -> Command {
        let cmd = Command::new("run-good")
            .version(env!("CARGO_PKG_VERSION"))
            .about("GNSS observations and products downloading, with GOOD")
            .long_about(
                "run-good generates the configuration of GOOD (GNSS Observations
and prOducts Downloader) from the command line, runs GOOD
with it, then deletes the configuration.
Flags are accepted with either a single or a double dash.",
            )
            .override_usage(
                "run-good -exe <PATH> -datadir <DIR> [-time <YYYY> <DOY> <NDAYS>] [-ftp <ARCH>] [PRODUCTS..]",
            )
            .after_help(
                "Examples:
run-good -exe /opt/good/run_GOOD -datadir /home/user/data -time 2024 10 3 -ftp cddis -obs daily igs site_igs.list
run-good -exe /opt/good/run_GOOD -datadir /home/user/data -time 2024 10 3 -ftp cddis -nav daily mixed3 igs
run-good -exe /opt/good/run_GOOD -datadir /home/user/data -time 2024 10 3 -ftp cddis -orbclk igs -snx -atx
run-good -exe D:\\good\\run_GOOD.exe -datadir D:\\data -time 2024 10 3 -ftp cddis -nav daily mixed3 igs -orbclk gfz_m",
            )
            .color(ColorChoice::Always);
        FLAGS.iter().fold(cmd, |cmd, flag| cmd.arg(flag.to_arg()))
    }
    /// Parses the given arguments, the first one being the program name
    pub fn try_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args = args.into_iter().map(|arg| normalize(arg.into()));
        Ok(Self {
            matches: Self::command().try_get_matches_from(args)?,
        })
    }
    /// Returns the GOOD executable
    pub fn executable(&self) -> &str {
        self.matches
            .get_one::<String>("exe")
            .map(|s| s.as_str())
            .unwrap_or_default()
    }
    /// Returns the data directory
    pub fn data_dir(&self) -> &str {
        self.matches
            .get_one::<String>("datadir")
            .map(|s| s.as_str())
            .unwrap_or_default()
    }
    fn values(&self, flag: &str) -> Option<Vec<&str>> {
        self.matches
            .get_many::<String>(flag)
            .map(|values| values.map(|s| s.as_str()).collect())
    }
    /// Returns the processing period, if defined by user
    pub fn proc_time(&self) -> Option<ProcTime> {
        match self.values("time").as_deref() {
            Some([year, doy, ndays]) => Some(ProcTime::new(year, doy, ndays)),
            _ => None,
        }
    }
    /// Returns the hour range, if defined by user
    pub fn hours(&self) -> Option<HourRange> {
        let hours: Vec<u8> = self.matches.get_many::<u8>("hh")?.copied().collect();
        match hours[..] {
            [start, count] => Some(HourRange::new(start, count)),
            _ => None,
        }
    }
    /// Returns the naming preference, if defined by user
    pub fn naming(&self) -> Option<NamingConvention> {
        self.matches.get_one::<NamingConvention>("l2s").copied()
    }
    /// Builds the [Document] described by the command line
    pub fn document(&self, platform: Platform, time: ProcTime) -> Document {
        let mut doc = Document::new(self.data_dir(), platform, time);
        if let Some([archive]) = self.values("ftp").as_deref() {
            doc.ftp = Ftp::enabled(archive);
        }
        if let Some([obs_type, from, list]) = self.values("obs").as_deref() {
            doc.obs = Observation::enabled(obs_type, from, list);
        }
        if let Some([nav_type, system, from]) = self.values("nav").as_deref() {
            doc.nav = Navigation::enabled(nav_type, system, from);
        }
        if let Some([from]) = self.values("orbclk").as_deref() {
            doc.orbclk = OrbitClock::enabled(from);
        }
        if let Some([from]) = self.values("eop").as_deref() {
            doc.eop = Eop::enabled(from);
        }
        if let Some([from]) = self.values("obx").as_deref() {
            doc.obx = Orbex::enabled(from);
        }
        if let Some([from]) = self.values("dsb").as_deref() {
            doc.dsb = Bias::enabled(BiasKind::Dsb, from);
        }
        if let Some([from]) = self.values("osb").as_deref() {
            doc.osb = Bias::enabled(BiasKind::Osb, from);
        }
        if let Some([from]) = self.values("ion").as_deref() {
            doc.ion = Ionosphere::enabled(from);
        }
        if let Some([from, list]) = self.values("trop").as_deref() {
            doc.trop = Troposphere::enabled(from, list);
        }
        doc.snx.enabled = self.matches.get_flag("snx");
        doc.roti.enabled = self.matches.get_flag("roti");
        doc.atx.enabled = self.matches.get_flag("atx");
        doc.transfer = TransferOptions {
            adjacent_days: self.matches.get_flag("add1day"),
            merge_sp3: self.matches.get_flag("merge"),
            wget_verbose: !self.matches.get_flag("quiet"),
        };
        if let Some(hours) = self.hours() {
            doc.set_hours(hours);
        }
        if let Some(naming) = self.naming() {
            doc.set_naming(naming);
        }
        doc
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &str) -> Result<Cli, clap::Error> {
        Cli::try_from_args(std::iter::once("run-good").chain(args.split_whitespace()))
    }

    fn render(args: &str) -> String {
        let cli = parse(args).unwrap();
        cli.document(Platform::Unix, ProcTime::new("2024", "1", "1"))
            .to_string()
    }

    #[test]
    fn flag_table() {
        for (i, flag) in FLAGS.iter().enumerate() {
            assert!(flag.name.len() > 1, "{} would collide with short flags", flag.name);
            assert!(
                FLAGS[i + 1..].iter().all(|other| other.name != flag.name),
                "{} is defined twice",
                flag.name
            );
        }
        let required: Vec<_> = FLAGS.iter().filter(|f| f.required).map(|f| f.name).collect();
        assert_eq!(required, vec!["exe", "datadir"]);
        Cli::command().debug_assert();
    }
    #[test]
    fn normalization() {
        for (arg, expected) in [
            ("-obs", "--obs"),
            ("--obs", "--obs"),
            ("-h", "-h"),
            ("-unknown", "-unknown"),
            ("obs", "obs"),
            ("/data", "/data"),
        ] {
            assert_eq!(normalize(OsString::from(arg)), expected);
        }
    }
    #[test]
    fn help_anywhere() {
        let args = |args: &str| -> Vec<OsString> {
            std::iter::once("run-good")
                .chain(args.split_whitespace())
                .map(OsString::from)
                .collect()
        };
        assert!(help_requested(&args("-h")));
        assert!(help_requested(&args("-exe -datadir /data -h")));
        assert!(help_requested(&args("--help -exe")));
        assert!(!help_requested(&args("-exe /opt/good/run_GOOD -datadir /data")));
        assert!(!help_requested(&args("-exe /opt/good/run_GOOD -datadir /data-h")));
    }
    #[cfg(unix)]
    #[test]
    fn non_utf8_value() {
        use std::os::unix::ffi::OsStringExt;
        let data_dir = OsString::from_vec(b"/d\xFFata".to_vec());
        let args = [
            OsString::from("run-good"),
            OsString::from("-exe"),
            OsString::from("/opt/good/run_GOOD"),
            OsString::from("-datadir"),
            data_dir,
        ];
        let err = Cli::try_from_args(args).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidUtf8);
        assert!(err.to_string().contains("--datadir"));
    }
    #[test]
    fn mandatory_flags() {
        let cli = parse("-exe /opt/good/run_GOOD -datadir /data").unwrap();
        assert_eq!(cli.executable(), "/opt/good/run_GOOD");
        assert_eq!(cli.data_dir(), "/data");
        assert!(cli.proc_time().is_none());
        assert!(cli.hours().is_none());
        assert!(cli.naming().is_none());

        let cli = parse("--exe /opt/good/run_GOOD --datadir /data").unwrap();
        assert_eq!(cli.executable(), "/opt/good/run_GOOD");
    }
    #[test]
    fn missing_mandatory_flags() {
        let err = parse("-time 2024 10 3 -obs daily igs all").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = parse("-datadir /data -time 2024 10 3").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = parse("-exe /opt/good/run_GOOD -time 2024 10 3").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }
    #[test]
    fn flag_like_values() {
        for args in [
            "-exe -datadir /data",
            "-exe /opt/good/run_GOOD -datadir -time 2024 10 3",
            "-exe /opt/good/run_GOOD -datadir /data -orbclk -eop igs",
            "-exe /opt/good/run_GOOD -datadir /data -time 2024 -10 3",
            "-exe /opt/good/run_GOOD -datadir /data -obs daily igs -nav daily gps igs",
            "-exe /opt/good/run_GOOD -datadir /data -trop cod -atx",
            "-exe /opt/good/run_GOOD -datadir /data -dsb -",
            "-exe /opt/good/run_GOOD -datadir /data -ion",
        ] {
            assert!(parse(args).is_err(), "\"{}\" should not be accepted", args);
        }
    }
    #[test]
    fn error_names_flag() {
        let err = parse("-exe /opt/good/run_GOOD -datadir /data -orbclk -eop igs")
            .err()
            .unwrap();
        assert!(err.to_string().contains("orbclk"));
    }
    #[test]
    fn invalid_flags() {
        for args in [
            "-exe /opt/good/run_GOOD -datadir /data -obs daily igs all -obs daily mgex all",
            "-exe /opt/good/run_GOOD -datadir /data -snx -snx",
            "-exe /opt/good/run_GOOD -datadir /data -unknown",
            "-exe /opt/good/run_GOOD -datadir /data stray",
            "-exe /opt/good/run_GOOD -datadir /data -hh 25 1",
            "-exe /opt/good/run_GOOD -datadir /data -hh 1",
            "-exe /opt/good/run_GOOD -datadir /data -l2s 3",
        ] {
            assert!(parse(args).is_err(), "\"{}\" should not be accepted", args);
        }
    }
    #[test]
    fn proc_time() {
        let cli = parse("-exe /opt/good/run_GOOD -datadir /data -time 2024 10 3").unwrap();
        let time = cli.proc_time().unwrap();
        assert_eq!(time, ProcTime::new("2024", "10", "3"));
        let rendered = cli.document(Platform::Unix, time).to_string();
        assert!(rendered.contains("2  2024  10  3"));
    }
    #[test]
    fn observation_default() {
        let rendered = render("-exe /opt/good/run_GOOD -datadir /data -nav daily mixed3 igs -snx");
        assert!(rendered.contains("  opt4obs: 0 "));
        assert!(rendered.contains("  obsType: daily "));
        assert!(rendered.contains("  obsFrom: mgex "));
        assert!(rendered.contains("  obsList: site_mgex.list "));
    }
    #[test]
    fn observation() {
        let rendered =
            render("-exe /opt/good/run_GOOD -datadir /data -obs daily igs site_igs.list");
        assert!(rendered.contains("  opt4obs: 1 "));
        assert!(rendered.contains("  obsType: daily "));
        assert!(rendered.contains("  obsFrom: igs "));
        assert!(rendered.contains("  obsList: site_igs.list "));
    }
    #[test]
    fn all_products() {
        let rendered = render(
            "-exe /opt/good/run_GOOD -datadir /data -ftp whu -obs hourly mgex all \
            -nav hourly gps dlr -orbclk cod+igs -eop igs_u -obx whu -dsb cas -osb gfz \
            -snx -ion cas+cod -roti -trop igs site_trp.list -atx",
        );
        for expected in [
            "  opt4ftp: 1 ",
            "  ftpArch: whu ",
            "  opt4obs: 1 ",
            "  obsType: hourly ",
            "  obsList: all ",
            "  opt4nav: 1 ",
            "  navSys : gps ",
            "  navFrom: dlr ",
            "  opt4oc : 1 ",
            "  ocFrom : cod+igs ",
            "  opt4eop: 1 ",
            "  eopFrom: igs_u ",
            "  opt4obx: 1 ",
            "  obxFrom: whu ",
            "  opt4dsb: 1 ",
            "  dsbFrom: cas ",
            "  opt4osb: 1 ",
            "  osbFrom: gfz ",
            "  opt4snx: 1 ",
            "  opt4ion: 1 ",
            "  ionFrom: cas+cod ",
            "  opt4rot: 1 ",
            "  opt4trp: 1 ",
            "  trpFrom: igs ",
            "  trpList: site_trp.list ",
            "  opt4atx: 1 ",
        ] {
            assert!(rendered.contains(expected), "missing \"{}\"", expected);
        }
    }
    #[test]
    fn troposphere_list() {
        let rendered = render("-exe /opt/good/run_GOOD -datadir /data -trop igs my_sites.list");
        assert!(rendered.contains("  trpFrom: igs "));
        assert!(rendered.contains("  trpList: my_sites.list "));
    }
    #[test]
    fn transfer_options() {
        let rendered = render(
            "-exe /opt/good/run_GOOD -datadir /data -hh 6 4 -l2s 0 -add1day -merge -quiet",
        );
        assert!(rendered.contains("  sHH4obs: 06 "));
        assert!(rendered.contains("  nHH4eop: 4 "));
        assert!(rendered.contains("  l2s4trp: 0 "));
        assert!(rendered.contains("minusAdd1day  : 1 "));
        assert!(rendered.contains("merge_sp3files: 1 "));
        assert!(rendered.contains("printInfoWget : 0 "));

        let cli = parse("-exe /opt/good/run_GOOD -datadir /data -hh 0 24 -l2s 2").unwrap();
        assert_eq!(cli.hours(), Some(HourRange::new(0, 24)));
        assert_eq!(cli.naming(), Some(NamingConvention::Both));
    }
    #[test]
    fn help() {
        let err = parse("-exe /opt/good/run_GOOD -datadir /data -h").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        let help = Cli::command().render_long_help().to_string();
        for flag in FLAGS.iter() {
            assert!(help.contains(&format!("--{}", flag.name)), "{}", flag.name);
        }
    }
}
