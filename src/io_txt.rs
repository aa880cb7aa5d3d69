use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use crate::error::{GridError, Result};
use crate::{write_atomic, Grid};

/// field separator of the text layout
pub const DELIMITER: char = ' ';

#[cfg(test)]
mod tests {
    use std::fs;
    use tempfile::tempdir;
    use crate::error::GridError;
    use crate::Grid;
    use super::{format_txt, parse_txt, read_txt, write_txt};

    #[test]
    fn test_parse_rows() {
        let grid = parse_txt("1 2 3\n4.5 -6 7e2\n").unwrap();
        assert_eq!(grid.shape(),Some((2,3)));
        assert_eq!(grid.get(0,0),Some(1.));
        assert_eq!(grid.get(1,0),Some(4.5));
        assert_eq!(grid.get(1,1),Some(-6.));
        assert_eq!(grid.get(1,2),Some(700.));
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let grid = parse_txt("1 2\r\n\r\n3 4\r\n\n").unwrap();
        assert_eq!(grid,Grid::from_rows(vec![vec![1.,2.],vec![3.,4.]]));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_txt("").unwrap().is_empty());
    }

    #[test]
    fn test_bad_token_location() {
        let err = parse_txt("1 2 3\n1.0 abc 3.0\n").unwrap_err();
        match err {
            GridError::Parse { line, column, token, .. } => {
                assert_eq!(line,2);
                assert_eq!(column,2);
                assert_eq!(token,"abc");
            }
            e => panic!("unexpected error {e:?}"),
        }
    }

    #[test]
    fn test_doubled_space_is_an_error() {
        let err = parse_txt("1  2").unwrap_err();
        assert!(matches!(err, GridError::Parse { line: 1, column: 2, .. }));
        let err = parse_txt("1 2 ").unwrap_err();
        assert!(matches!(err, GridError::Parse { line: 1, column: 3, .. }));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(parse_txt("1 inf").unwrap_err(), GridError::Parse { column: 2, .. }));
        assert!(matches!(parse_txt("NaN").unwrap_err(), GridError::Parse { column: 1, .. }));
    }

    #[test]
    fn test_ragged_rows_accepted() {
        let grid = parse_txt("1 2 3\n4\n").unwrap();
        assert_eq!(grid.n_rows(),2);
        assert!(!grid.is_rectangular());
    }

    #[test]
    fn test_invalid_utf8_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        fs::write(&path,b"1 2 3\r\n1 \xff 3\r\n").unwrap();
        match read_txt(&path).unwrap_err() {
            GridError::Parse { line, column, token, .. } => {
                assert_eq!(line,2);
                assert_eq!(column,2);
                assert_eq!(token,"\u{FFFD}");
            }
            e => panic!("unexpected error {e:?}"),
        }
    }

    #[test]
    fn test_read_crlf_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crlf.txt");
        fs::write(&path,"1 2\r\n\r\n3 4\r\n").unwrap();
        assert_eq!(read_txt(&path).unwrap(),Grid::from_rows(vec![vec![1.,2.],vec![3.,4.]]));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_txt(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, GridError::Io { .. }));
    }

    #[test]
    fn test_format_reparses() {
        let grid = Grid::from_rows(vec![vec![0.1,-2.5,1e-7],vec![3.,4.,123456.789]]);
        let txt = format_txt(&grid);
        assert_eq!(parse_txt(&txt).unwrap(),grid);
    }

    #[test]
    fn test_write_and_read_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.txt");
        let grid = Grid::from_rows(vec![vec![1.5,2.5],vec![3.5,4.5]]);
        write_txt(&grid,&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(),"1.5 2.5\n3.5 4.5\n");
        assert_eq!(read_txt(&path).unwrap(),grid);
    }

}

/// read a space-delimited height grid from a text file, one row per line
pub fn read_txt(txt_file:impl AsRef<Path>) -> Result<Grid> {
    let path = txt_file.as_ref();
    let f = File::open(path).map_err(|e| GridError::io(path,e))?;
    let mut rows = vec![];
    for (i,bytes) in BufReader::new(f).split(b'\n').enumerate() {
        let mut bytes = bytes.map_err(|e| GridError::io(path,e))?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        let line = decode_line(i + 1,&bytes)?;
        if let Some(row) = parse_line(i + 1,line)? {
            rows.push(row);
        }
    }
    Ok(Grid::from_rows(rows))
}

/// parse a height grid from text already in memory
pub fn parse_txt(text:&str) -> Result<Grid> {
    let mut rows = vec![];
    for (i,line) in text.lines().enumerate() {
        if let Some(row) = parse_line(i + 1,line)? {
            rows.push(row);
        }
    }
    Ok(Grid::from_rows(rows))
}

/// render a grid in the text layout read by `read_txt`
pub fn format_txt(grid:&Grid) -> String {
    let mut out = String::new();
    for row in grid.rows() {
        let fields:Vec<String> = row.iter().map(|v| v.to_string()).collect();
        out.push_str(&fields.join(" "));
        out.push('\n');
    }
    out
}

pub fn write_txt(grid:&Grid, txt_file:impl AsRef<Path>) -> Result<()> {
    write_atomic(txt_file.as_ref(),format_txt(grid).as_bytes())
}

/// undecodable bytes are reported against the token that holds them
fn decode_line(line_no:usize, bytes:&[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| {
        let valid = &bytes[..e.valid_up_to()];
        let start = valid.iter().rposition(|&b| b == DELIMITER as u8).map_or(0,|p| p + 1);
        let end = bytes[start..].iter().position(|&b| b == DELIMITER as u8).map_or(bytes.len(),|p| start + p);
        GridError::Parse {
            line: line_no,
            column: valid.iter().filter(|&&b| b == DELIMITER as u8).count() + 1,
            token: String::from_utf8_lossy(&bytes[start..end]).into_owned(),
            reason: e.to_string(),
        }
    })
}

/// Blank lines yield no row, unlike a csv reader, which emits an empty row for an
/// interior blank line.
fn parse_line(line_no:usize, line:&str) -> Result<Option<Vec<f64>>> {
    if line.is_empty() {
        return Ok(None);
    }
    line.split(DELIMITER)
        .enumerate()
        .map(|(j,token)| parse_token(line_no,j + 1,token))
        .collect::<Result<Vec<f64>>>()
        .map(Some)
}

fn parse_token(line:usize, column:usize, token:&str) -> Result<f64> {
    let err = |reason:String| GridError::Parse {
        line,
        column,
        token: token.to_string(),
        reason,
    };
    if token.is_empty() {
        return Err(err("empty field, fields must be separated by a single space".to_string()));
    }
    let value = token.parse::<f64>().map_err(|e| err(e.to_string()))?;
    if !value.is_finite() {
        return Err(err("is not a finite number".to_string()));
    }
    Ok(value)
}
