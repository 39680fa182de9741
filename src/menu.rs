// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Interactive numbered menu over a [`NoteStore`]

use std::io::{self, BufRead, Write};

use crate::config::MenuConfig;
use crate::model::Note;
use crate::store::NoteStore;

/// Run the menu until Exit or end of input
pub fn run<R: BufRead, W: Write>(
    store: &mut NoteStore,
    config: &MenuConfig,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    loop {
        writeln!(output, "\n--- NEONOTATE ---")?;
        writeln!(output, "1. Add Category")?;
        writeln!(output, "2. Add Note")?;
        writeln!(output, "3. View Notes")?;
        writeln!(output, "4. Search Notes")?;
        writeln!(output, "5. Export Notes")?;
        writeln!(output, "6. Exit")?;

        let Some(choice) = prompt(input, output, "Enter your choice: ")? else {
            break;
        };

        match choice.trim() {
            "1" => {
                let Some(name) = prompt(input, output, "Enter Category Name: ")? else { break };
                let Some(raw) = prompt(
                    input,
                    output,
                    &format!("Enter keywords (separated by '{}'): ", config.keyword_separator),
                )?
                else {
                    break;
                };
                let keywords: Vec<&str> = raw.split(config.keyword_separator).collect();
                match store.add_category(&name, &keywords) {
                    Ok(stored) => writeln!(
                        output,
                        "Category '{}' added successfully with keywords: {}",
                        name.trim(),
                        stored.join(", ")
                    )?,
                    Err(e) => writeln!(output, "Error: {}", e)?,
                }
            }
            "2" => {
                let Some(content) = prompt(input, output, "Enter note content: ")? else { break };
                match store.add_note(&content) {
                    Ok(note) => writeln!(
                        output,
                        "Note added successfully under category '{}'.",
                        note.category
                    )?,
                    Err(e) => writeln!(output, "Error: {}", e)?,
                }
            }
            "3" => match store.view_notes() {
                Ok(notes) => {
                    writeln!(output, "\n--- Viewing All Notes ---")?;
                    for note in notes {
                        write_note(output, note)?;
                    }
                }
                Err(e) => writeln!(output, "{}", e)?,
            },
            "4" => {
                let Some(keyword) = prompt(input, output, "Enter keyword to search: ")? else { break };
                match store.search_notes(&keyword) {
                    Ok(results) if results.is_empty() => writeln!(
                        output,
                        "No notes found containing the keyword '{}'.",
                        keyword.trim()
                    )?,
                    Ok(results) => {
                        for note in results {
                            write_note(output, note)?;
                        }
                    }
                    Err(e) => writeln!(output, "Error: {}", e)?,
                }
            }
            "5" => {
                let Some(path) = prompt(input, output, "Enter filename to export notes: ")? else { break };
                match store.export_notes(&path) {
                    Ok(count) => writeln!(
                        output,
                        "Exported {} notes successfully to '{}'.",
                        count,
                        path.trim()
                    )?,
                    Err(e) => writeln!(output, "Error: {}", e)?,
                }
            }
            "6" => {
                writeln!(output, "Thank you for using NEONOTATE! Goodbye!")?;
                return Ok(());
            }
            _ => writeln!(output, "Invalid choice. Please enter a number between 1 and 6.")?,
        }
    }

    writeln!(output)?;
    Ok(())
}

/// Print a note the way every listing does
pub fn write_note<W: Write>(output: &mut W, note: &Note) -> io::Result<()> {
    writeln!(output, "Category: {} | Note: {}", note.category, note.content)
}

/// Read one line; `None` on end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> io::Result<Option<String>> {
    write!(output, "{}", text)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
