//! Definiciones de steps de tipo comando.
//!
//! Un step es una declaración estática: directorio de código, plantilla de
//! línea de comandos con placeholders nombrados, entorno de ejecución y slots
//! de entrada/salida tipados. El step no se ejecuta localmente; la capa
//! remota sustituye los placeholders y lanza el programa.
//! - `IoType`: tipos de slot aceptados por el control plane.
//! - `CommandTemplate`: parsing de `${{inputs.X}}` / `${{outputs.Y}}`.
//! - `CommandStep` + `CommandStepBuilder`.

pub mod definition;
mod io;
pub mod template;

pub use definition::{CommandStep, CommandStepBuilder};
pub use io::IoType;
pub use template::{CommandTemplate, Placeholder};
