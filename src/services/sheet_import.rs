use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::Role,
        dto::request::{CreateTestRequest, QuestionInput},
    },
};

const SUBJECT: &str = "Subject";
const DURATION: &str = "Duration";
const QUESTIONS: &str = "Questions";
const AVAILABLE_FOR: &str = "AvailableFor";

static EMPTY_CELL: Data = Data::Empty;

/// Reads the first sheet of an uploaded workbook into test requests.
///
/// The batch is all-or-nothing: the first bad row fails the whole upload.
pub fn parse_workbook(bytes: Vec<u8>) -> AppResult<Vec<CreateTestRequest>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::ValidationError("Workbook has no sheets".to_string()))??;

    parse_rows(range.rows())
}

struct Columns {
    subject: usize,
    duration: usize,
    questions: usize,
    available_for: usize,
}

impl Columns {
    fn from_header(header: &[Data]) -> AppResult<Self> {
        let find = |name: &str| {
            header
                .iter()
                .position(|cell| matches!(cell, Data::String(s) if s.trim() == name))
                .ok_or_else(|| {
                    AppError::ValidationError(format!("Missing '{}' column in header row", name))
                })
        };

        Ok(Self {
            subject: find(SUBJECT)?,
            duration: find(DURATION)?,
            questions: find(QUESTIONS)?,
            available_for: find(AVAILABLE_FOR)?,
        })
    }
}

pub fn parse_rows<'a, I>(rows: I) -> AppResult<Vec<CreateTestRequest>>
where
    I: IntoIterator<Item = &'a [Data]>,
{
    let mut rows = rows.into_iter();
    let header = rows
        .next()
        .ok_or_else(|| AppError::ValidationError("Spreadsheet is empty".to_string()))?;
    let columns = Columns::from_header(header)?;

    let mut requests = Vec::new();
    // Spreadsheet row numbers are 1-based and the header is row 1.
    for (row_number, row) in (2..).zip(rows) {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }

        let request = parse_row(row, &columns)
            .map_err(|e| AppError::ValidationError(format!("row {}: {}", row_number, e)))?;
        request
            .validate()
            .map_err(|e| AppError::ValidationError(format!("row {}: {}", row_number, e)))?;

        requests.push(request);
    }

    if requests.is_empty() {
        return Err(AppError::ValidationError(
            "Spreadsheet contains no tests".to_string(),
        ));
    }

    Ok(requests)
}

fn parse_row(row: &[Data], columns: &Columns) -> Result<CreateTestRequest, String> {
    let cell = |index: usize| row.get(index).unwrap_or(&EMPTY_CELL);

    let subject = cell_text(cell(columns.subject))
        .ok_or_else(|| format!("{} is empty", SUBJECT))?;

    let duration = cell_minutes(cell(columns.duration))
        .ok_or_else(|| format!("{} must be a whole number of minutes", DURATION))?;

    let questions_json = cell_text(cell(columns.questions))
        .ok_or_else(|| format!("{} is empty", QUESTIONS))?;
    let questions: Vec<QuestionInput> = serde_json::from_str(&questions_json)
        .map_err(|e| format!("{} is not a valid JSON question list: {}", QUESTIONS, e))?;

    let available_for = cell_text(cell(columns.available_for))
        .ok_or_else(|| format!("{} is empty", AVAILABLE_FOR))?
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            name.parse::<Role>()
                .map_err(|_| format!("unknown role '{}' in {}", name, AVAILABLE_FOR))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CreateTestRequest {
        subject,
        duration,
        questions,
        available_for,
    })
}

fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn cell_minutes(cell: &Data) -> Option<u32> {
    let value = match cell {
        Data::Int(i) => *i as f64,
        Data::Float(f) => *f,
        Data::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };

    if value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    Some(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUESTIONS_JSON: &str = r#"[{"text":"2 + 2?","options":["1","2","3","4"],"correctAnswer":3}]"#;

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    fn header() -> Vec<Data> {
        vec![text("Subject"), text("Duration"), text("Questions"), text("AvailableFor")]
    }

    fn parse(rows: &[Vec<Data>]) -> AppResult<Vec<CreateTestRequest>> {
        parse_rows(rows.iter().map(Vec::as_slice))
    }

    #[test]
    fn test_parses_rows_into_requests() {
        let rows = vec![
            header(),
            vec![text("Math"), Data::Float(30.0), text(QUESTIONS_JSON), text("Student, Admin")],
            vec![text("Physics"), Data::Int(45), text(QUESTIONS_JSON), text("Student")],
        ];

        let requests = parse(&rows).unwrap();

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].subject, "Math");
        assert_eq!(requests[0].duration, 30);
        assert_eq!(requests[0].available_for, vec![Role::Student, Role::Admin]);
        assert_eq!(requests[0].questions[0].correct_answer, 3);
        assert_eq!(requests[1].duration, 45);
    }

    #[test]
    fn test_columns_may_appear_in_any_order() {
        let rows = vec![
            vec![text("AvailableFor"), text("Questions"), text("Subject"), text("Duration")],
            vec![text("Student"), text(QUESTIONS_JSON), text("Chemistry"), text("15")],
        ];

        let requests = parse(&rows).unwrap();

        assert_eq!(requests[0].subject, "Chemistry");
        assert_eq!(requests[0].duration, 15);
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let rows = vec![
            header(),
            vec![Data::Empty, Data::Empty, Data::Empty, Data::Empty],
            vec![text("Math"), Data::Int(10), text(QUESTIONS_JSON), text("Student")],
        ];

        assert_eq!(parse(&rows).unwrap().len(), 1);
    }

    #[test]
    fn test_one_bad_row_fails_the_batch() {
        let rows = vec![
            header(),
            vec![text("Math"), Data::Int(10), text(QUESTIONS_JSON), text("Student")],
            vec![text("Broken"), Data::Int(10), text("not json"), text("Student")],
        ];

        match parse(&rows) {
            Err(AppError::ValidationError(msg)) => assert!(msg.starts_with("row 3:"), "{}", msg),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_question_fails_validation() {
        let bad_answer = r#"[{"text":"Q","options":["a","b","c","d"],"correctAnswer":7}]"#;
        let rows = vec![
            header(),
            vec![text("Math"), Data::Int(10), text(bad_answer), text("Student")],
        ];

        assert!(matches!(parse(&rows), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let rows = vec![
            header(),
            vec![text("Math"), Data::Int(10), text(QUESTIONS_JSON), text("Student,Teacher")],
        ];

        match parse(&rows) {
            Err(AppError::ValidationError(msg)) => assert!(msg.contains("Teacher")),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_fractional_duration_is_rejected() {
        let rows = vec![
            header(),
            vec![text("Math"), Data::Float(12.5), text(QUESTIONS_JSON), text("Student")],
        ];

        assert!(matches!(parse(&rows), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let rows = vec![
            vec![text("Subject"), text("Duration"), text("Questions")],
            vec![text("Math"), Data::Int(10), text(QUESTIONS_JSON)],
        ];

        match parse(&rows) {
            Err(AppError::ValidationError(msg)) => assert!(msg.contains("AvailableFor")),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_sheet_is_rejected() {
        assert!(matches!(parse(&[header()]), Err(AppError::ValidationError(_))));
        assert!(matches!(parse(&[]), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_reads_real_xlsx_workbook() {
        let bytes = include_bytes!("../../tests/fixtures/tests.xlsx").to_vec();

        let requests = parse_workbook(bytes).unwrap();

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].subject, "Math");
        assert_eq!(requests[0].duration, 30);
        assert_eq!(requests[0].questions.len(), 2);
        assert_eq!(requests[0].questions[1].correct_answer, 1);
        assert_eq!(requests[1].subject, "Chemistry");
        assert_eq!(requests[1].duration, 45);
        assert_eq!(requests[1].available_for, vec![Role::Student, Role::Admin]);
    }

    #[test]
    fn test_non_spreadsheet_bytes_are_rejected() {
        let result = parse_workbook(b"definitely not a workbook".to_vec());
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
