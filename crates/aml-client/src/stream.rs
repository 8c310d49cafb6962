//! Streaming bloqueante de un job.
//!
//! Consulta estado y logs cada `poll_interval` hasta un estado terminal.
//! Los logs se piden completos en cada vuelta; sólo se escribe lo nuevo de
//! cada fichero. Sin timeout: el llamador queda bloqueado hasta que el job
//! termina o falla.

use std::collections::BTreeMap;
use std::io::Write;
use std::thread;
use std::time::Duration;

use aml_core::{JobStatus, SubmittedJob};
use log::info;

use crate::control_plane::ControlPlane;
use crate::error::ClientError;

pub fn stream_job<C, W>(client: &C, name: &str, poll_interval: Duration, out: &mut W) -> Result<SubmittedJob, ClientError>
    where C: ControlPlane + ?Sized,
          W: Write
{
    writeln!(out, "RunId: {name}")?;
    let mut offsets: BTreeMap<String, usize> = BTreeMap::new();
    let mut last_status: Option<JobStatus> = None;
    loop {
        let job = client.get_job(name)?;
        if last_status != Some(job.status) {
            info!("job {name} status: {}", job.status);
            last_status = Some(job.status);
        }
        for (file, content) in client.job_logs(name)? {
            write_new_content(out, &mut offsets, &file, &content)?;
        }
        if job.status.is_terminal() {
            writeln!(out)?;
            writeln!(out, "Execution Summary")?;
            writeln!(out, "=================")?;
            writeln!(out, "RunId: {name}")?;
            writeln!(out, "Status: {}", job.status)?;
            out.flush()?;
            if job.status.is_success() {
                return Ok(job);
            }
            return Err(ClientError::JobFailed { name: name.to_string(), status: job.status });
        }
        out.flush()?;
        thread::sleep(poll_interval);
    }
}

fn write_new_content<W: Write>(out: &mut W, offsets: &mut BTreeMap<String, usize>, file: &str, content: &str) -> std::io::Result<()> {
    let seen = offsets.entry(file.to_string()).or_insert_with(|| usize::MAX);
    if *seen == usize::MAX {
        writeln!(out, "Streaming {file}")?;
        writeln!(out, "{}", "=".repeat(file.len() + 10))?;
        *seen = 0;
    }
    // Un fichero que encoge (rotación) se vuelve a leer desde el principio.
    if content.len() < *seen {
        *seen = 0;
    }
    // Un fichero reescrito puede dejar el offset dentro de un carácter.
    while !content.is_char_boundary(*seen) {
        *seen -= 1;
    }
    out.write_all(content[*seen..].as_bytes())?;
    *seen = content.len();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_new_bytes_are_written() {
        let mut out = Vec::new();
        let mut offsets = BTreeMap::new();
        write_new_content(&mut out, &mut offsets, "a.txt", "one\n").unwrap();
        write_new_content(&mut out, &mut offsets, "a.txt", "one\ntwo\n").unwrap();
        write_new_content(&mut out, &mut offsets, "a.txt", "one\ntwo\n").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Streaming a.txt\n===============\none\ntwo\n");
    }

    #[test]
    fn shrunk_file_is_replayed() {
        let mut out = Vec::new();
        let mut offsets = BTreeMap::new();
        write_new_content(&mut out, &mut offsets, "f", "abcdef").unwrap();
        write_new_content(&mut out, &mut offsets, "f", "xy").unwrap();
        assert!(String::from_utf8(out).unwrap().ends_with("abcdefxy"));
    }

    #[test]
    fn offset_inside_a_character_keeps_streaming() {
        let mut out = Vec::new();
        let mut offsets = BTreeMap::new();
        write_new_content(&mut out, &mut offsets, "f", "ab").unwrap();
        // El fichero se reescribe: el offset 2 cae dentro de 'ñ' (bytes 1..3).
        write_new_content(&mut out, &mut offsets, "f", "añb").unwrap();
        write_new_content(&mut out, &mut offsets, "f", "añbc").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("abñbc"), "got {text:?}");
    }
}
