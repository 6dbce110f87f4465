use crate::error::ShellError;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: BTreeMap<&'static str, Flag>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: &'static str,
    pub long: &'static str,
    pub description: &'static str,
    pub takes_value: bool,
    pub value: Option<String>,
}

impl Flag {
    fn switch(short: &'static str, long: &'static str, description: &'static str) -> Self {
        Flag {
            short,
            long,
            description,
            takes_value: false,
            value: None,
        }
    }

    fn option(short: &'static str, long: &'static str, description: &'static str) -> Self {
        Flag {
            takes_value: true,
            ..Flag::switch(short, long, description)
        }
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = BTreeMap::new();

        flags.insert("help", Flag::switch("-h", "--help", "Print this help message"));
        flags.insert(
            "version",
            Flag::switch("-v", "--version", "Show version information"),
        );
        flags.insert(
            "quiet",
            Flag::switch("-q", "--quiet", "Don't report how commands ended"),
        );
        flags.insert("debug", Flag::switch("-d", "--debug", "Enable debug output"));
        flags.insert(
            "log",
            Flag::option("-l", "--log", "Write the termination log to this file"),
        );
        flags.insert(
            "literal-split",
            Flag::switch(
                "-L",
                "--literal-split",
                "Split on every single space, keeping empty arguments",
            ),
        );
        flags.insert(
            "no-history",
            Flag::switch("-n", "--no-history", "Don't load or save line history"),
        );

        Flags { flags }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let flag = self
                .flags
                .values_mut()
                .find(|flag| arg == flag.short || arg == flag.long)
                .ok_or_else(|| ShellError::FlagError(format!("Unknown flag {}", arg)))?;

            if flag.takes_value {
                let value = iter.next().ok_or_else(|| {
                    ShellError::FlagError(format!("Flag {} requires a value", arg))
                })?;
                flag.value = Some(value.clone());
            } else {
                flag.value = Some("true".to_string());
            }
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get_value(name).is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&String> {
        self.flags.get(name).and_then(|f| f.value.as_ref())
    }

    pub fn print_help(&self) {
        println!("Usage: mantle [OPTIONS]");
        println!("\nOptions:");
        for flag in self.flags.values() {
            let long = if flag.takes_value {
                format!("{} <path>", flag.long)
            } else {
                flag.long.to_string()
            };
            println!("  {}, {:<22} {}", flag.short, long, flag.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Flags, ShellError> {
        let mut flags = Flags::new();
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        flags.parse(&args)?;
        Ok(flags)
    }

    #[test]
    fn test_switches() {
        let flags = parse(&["-q", "--literal-split"]).unwrap();
        assert!(flags.is_set("quiet"));
        assert!(flags.is_set("literal-split"));
        assert!(!flags.is_set("debug"));
        assert!(!flags.is_set("help"));
    }

    #[test]
    fn test_value_flag() {
        let flags = parse(&["--log", "/tmp/jobs.log", "-d"]).unwrap();
        assert_eq!(flags.get_value("log").map(String::as_str), Some("/tmp/jobs.log"));
        assert!(flags.is_set("debug"));
    }

    #[test]
    fn test_missing_value() {
        assert!(matches!(parse(&["-l"]), Err(ShellError::FlagError(_))));
    }

    #[test]
    fn test_unknown_flag() {
        assert!(matches!(parse(&["--frobnicate"]), Err(ShellError::FlagError(_))));
    }
}
