//! The `secquiz init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("secquiz.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("submissions")?;
    write_if_missing(Path::new("submissions/example.toml"), EXAMPLE_SUBMISSIONS)?;

    println!("\nNext steps:");
    println!("  1. Run: secquiz scenarios");
    println!("  2. Run: secquiz grade --submissions submissions/example.toml");
    println!("  3. Run: secquiz serve");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# secquiz configuration

host = "127.0.0.1"
port = 8080

# Custom data files. The bundled scenarios and built-in taxonomy are used
# when these are commented out. ${VAR} references are expanded.
# catalog = "scenarios.toml"
# taxonomy = "${SECQUIZ_DATA}/taxonomy.toml"
"#;

const EXAMPLE_SUBMISSIONS: &str = r#"# Each submission is one learner answer to a catalog scenario.
# List the scenarios with: secquiz scenarios

[[submissions]]
id = "example-ransomware"
scenario_id = 2
response = """
We should have had air-gapped backups and applied patches immediately \
to prevent this ransomware incident.
"""

[[submissions]]
id = "example-phishing"
scenario_id = 1
response = """
Staff need regular security awareness training to recognise phishing emails, \
and multi-factor authentication would have stopped the stolen credentials \
from being useful. Email filtering with DMARC would catch spoofed senders.
"""

[[submissions]]
id = "example-short"
scenario_id = 3
response = "Use better passwords."
"#;
