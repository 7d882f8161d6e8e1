use std::path::Path;

use educa_core::identity::matricula::current_year;
use educa_core::identity::MatriculaGenerator;
use educa_core::roster::Roster;

use super::load_config;

/// Run the `matricula` command: print the next code for the roster.
pub fn run(config_path: &str, year: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let year = match year {
        Some(year) => validate_year(year)?,
        None => current_year(),
    };

    let roster = Roster::load(Path::new(&config.educa.roster_path))?;
    let generator = MatriculaGenerator::new(config.accounts.matricula_prefix.clone());
    println!("{}", generator.generate(&year, &roster));
    Ok(())
}

fn validate_year(year: &str) -> anyhow::Result<String> {
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        anyhow::bail!("year must have four digits, got {year:?}");
    }
    Ok(year.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_four_digit_year() {
        assert_eq!(validate_year("2024").unwrap(), "2024");
    }

    #[test]
    fn rejects_malformed_year() {
        for year in ["24", "20245", "2O24", ""] {
            assert!(validate_year(year).is_err(), "year {year:?}");
        }
    }
}
