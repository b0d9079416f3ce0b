/// POSIX-shell idioms. `ls` piped straight into another command is left to
/// the `ls -l`/`ls -a` entry, so only a bare or argument-carrying `ls` matches.
pub const DEFAULT_POSIX_PATTERNS: &[&str] = &[
    r"\bls\s+-[la]",
    r"\bls\b(?:$|\S|\s+(?:[^\s|]|$))",
    r"\bcat\s+",
    r"\bgrep\s+",
    r"\bfind\s+\.\s+-name",
    r"\becho\s+\$",
    r"\bprintenv\b",
    r"\buname\b",
    r"\bdf\s+-h",
    r"\bps\s+aux",
    r"\btop\b",
    r"\bchmod\b",
    r"\btouch\b",
    r"\brm\s+-",
    r"\bcp\s+-",
    r"\bmv\s+",
    r"/proc/",
    r"/etc/",
];

pub const DEFAULT_WINDOWS_PATTERNS: &[&str] = &[
    r"\bGet-ChildItem\b",
    r"\bGet-Content\b",
    r"\bSet-Content\b",
    r"\bNew-Item\b",
    r"\bGet-Process\b",
    r"\bGet-ComputerInfo\b",
    r"\bGet-PSDrive\b",
    r"\bGet-Volume\b",
    r"\bGet-Command\b",
    r"\$env:",
    r"\bdir\s+/s",
    r"\btype\s+",
    r"\bsysteminfo\b",
    r"\bwmic\b",
    r"\btasklist\b",
    r"\bwhere\s+",
    r"%[A-Z_][A-Z0-9_]*%",
];
