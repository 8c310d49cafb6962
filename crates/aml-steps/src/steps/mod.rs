//! Declaraciones de los cuatro steps.
//!
//! Todos comparten la misma referencia de entorno (`<env>@latest`) y cuelgan
//! de un directorio raíz de código común (`data-science/src` por defecto).
//!
//! Los directorios de código no se suben al enviar el job: se envía la ruta
//! y el código tiene que estar ya disponible en el workspace remoto.

pub mod evaluate;
pub mod prep;
pub mod register;
pub mod train;

use aml_core::{CommandStep, GraphError};

/// Raíz por defecto de los directorios de código de los steps.
pub const DEFAULT_CODE_ROOT: &str = "data-science/src";

/// `<root>/<dir>` sin duplicar separadores.
pub(crate) fn code_dir(root: &str, dir: &str) -> String {
    format!("{}/{}", root.trim_end_matches('/'), dir)
}

/// Los cuatro steps declarados para un entorno concreto.
#[derive(Debug, Clone)]
pub struct TaxiSteps {
    pub prep: CommandStep,
    pub train: CommandStep,
    pub evaluate: CommandStep,
    pub register: CommandStep,
}

impl TaxiSteps {
    pub fn declare(code_root: &str, environment: &str) -> Result<Self, GraphError> {
        Ok(Self { prep: prep::prep_data(code_root, environment)?,
                  train: train::train_model(code_root, environment)?,
                  evaluate: evaluate::evaluate_model(code_root, environment)?,
                  register: register::register_model(code_root, environment)? })
    }

    /// Igual que `declare` con la raíz por defecto.
    pub fn with_environment(environment: &str) -> Result<Self, GraphError> {
        Self::declare(DEFAULT_CODE_ROOT, environment)
    }

    pub fn all(&self) -> [&CommandStep; 4] {
        [&self.prep, &self.train, &self.evaluate, &self.register]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_dir_joins_once() {
        assert_eq!(code_dir("data-science/src", "prep"), "data-science/src/prep");
        assert_eq!(code_dir("data-science/src/", "prep"), "data-science/src/prep");
    }

    #[test]
    fn all_steps_share_the_environment() {
        let steps = TaxiSteps::with_environment("taxi-env@latest").unwrap();
        assert!(steps.all().iter().all(|s| s.environment() == "taxi-env@latest"));
    }
}
