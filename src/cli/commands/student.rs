use crate::cli::commands::{confirm, open_pool};
use crate::cli::parser::StudentCmd;
use crate::config::Config;
use crate::core::students::StudentLogic;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::models::{Student, StudentInput};
use crate::ui::messages::{info, success, warning};
use crate::utils::table::Table;
use std::path::Path;

pub fn handle(action: &StudentCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match action {
        StudentCmd::Add {
            id,
            name,
            year_level,
            course,
        } => {
            let input = StudentInput::new(id, name, year_level, course);
            let s = StudentLogic::create(&mut pool, &input)?;
            success(format!("Student added: {}", s.label()));
        }

        StudentCmd::Edit {
            id,
            name,
            year_level,
            course,
        } => {
            let current = StudentLogic::get(&mut pool, id)?;
            let input = StudentInput {
                student_id: current.student_id,
                fname: name.clone().unwrap_or(current.fname),
                year_level: year_level.clone().unwrap_or(current.year_level),
                course: course.clone().unwrap_or(current.course),
            };
            let s = StudentLogic::update(&mut pool, &input)?;
            success(format!("Student updated: {}", s.label()));
        }

        StudentCmd::Del { id, yes } => {
            let student = StudentLogic::get(&mut pool, id)?;
            if !confirm(
                cfg,
                *yes,
                &format!("Delete {} and all their attendance entries?", student.label()),
            )? {
                warning("Deletion cancelled.");
                return Ok(());
            }
            let removed = StudentLogic::delete(&mut pool, id)?;
            success(format!(
                "Student {id} deleted ({removed} attendance entries removed)"
            ));
        }

        StudentCmd::List => {
            print_students(&StudentLogic::list(&mut pool)?);
        }

        StudentCmd::Search { query } => {
            print_students(&StudentLogic::search(&mut pool, query)?);
        }

        StudentCmd::Import { file } => {
            let outcome = StudentLogic::import_csv(&mut pool, Path::new(file))?;
            success(format!("Imported {} students", outcome.inserted));
            if outcome.duplicates > 0 {
                info(format!("{} rows skipped: id already exists", outcome.duplicates));
            }
            if outcome.malformed > 0 {
                warning(format!("{} rows skipped: missing fields", outcome.malformed));
            }
        }

        StudentCmd::Export { file, force } => {
            ExportLogic::export_students(&mut pool, file, *force)?;
        }
    }

    Ok(())
}

fn print_students(students: &[Student]) {
    if students.is_empty() {
        info("No students found.");
        return;
    }

    let mut table = Table::with_headers(&["Student ID", "First Name", "Year Level", "Course"]);
    for s in students {
        table.add_row(vec![
            s.student_id.clone(),
            s.fname.clone(),
            s.year_level.clone(),
            s.course.clone(),
        ]);
    }
    print!("{}", table.render());
    println!("{} student(s)", students.len());
}
