use crate::dynamics::{ChassisDesc, SphereDesc};
use crate::io::LoadError;
use crate::math::{Real, Vector};
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

/// Parses a chassis description.
///
/// Each line is either blank, a `#` comment, a sphere record `v x y z radius`, or a strut
/// record `c i j` connecting the 0-based spheres `i` and `j`. Strut indices are checked when
/// the chassis is built, not here.
pub fn parse_chassis(text: &str) -> Result<ChassisDesc, LoadError> {
    load_chassis(text.as_bytes())
}

/// Reads a chassis description from `reader`. See [`parse_chassis`] for the format.
pub fn load_chassis<R: BufRead>(reader: R) -> Result<ChassisDesc, LoadError> {
    let mut desc = ChassisDesc::default();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = i + 1;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            None => {}
            Some(keyword) if keyword.starts_with('#') => {}
            Some("v") => {
                let [x, y, z, radius] = parse_fields::<Real, 4>(tokens, line_number)?;

                if ![x, y, z, radius].iter().all(|v| v.is_finite()) {
                    return Err(LoadError::Parse {
                        line: line_number,
                        message: "sphere fields must be finite".to_string(),
                    });
                }

                desc.spheres
                    .push(SphereDesc::new(Vector::new(x, y, z), radius));
            }
            Some("c") => {
                let [a, b] = parse_fields::<u32, 2>(tokens, line_number)?;
                desc.struts.push([a, b]);
            }
            Some(keyword) => {
                return Err(LoadError::UnknownRecord {
                    line: line_number,
                    keyword: keyword.to_string(),
                })
            }
        }
    }

    Ok(desc)
}

/// Reads a chassis description from the file at `path`. See [`parse_chassis`] for the format.
pub fn load_chassis_file(path: impl AsRef<Path>) -> Result<ChassisDesc, LoadError> {
    let file = std::fs::File::open(path)?;
    load_chassis(std::io::BufReader::new(file))
}

fn parse_fields<'a, T, const N: usize>(
    mut tokens: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<[T; N], LoadError>
where
    T: FromStr + Copy + Default,
{
    let mut fields = [T::default(); N];

    for (k, field) in fields.iter_mut().enumerate() {
        let token = tokens.next().ok_or_else(|| LoadError::Parse {
            line,
            message: format!("expected {} fields, found {}", N, k),
        })?;
        *field = token.parse().map_err(|_| LoadError::Parse {
            line,
            message: format!("invalid field `{}`", token),
        })?;
    }

    if let Some(extra) = tokens.next() {
        return Err(LoadError::Parse {
            line,
            message: format!("unexpected trailing field `{}`", extra),
        });
    }

    Ok(fields)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_spheres_and_struts() {
        let desc = parse_chassis(
            "# tofu\n\
             v 1 0 0 0.5\n\
             \n\
             v -1 0.5 2 0.25\n\
             c 0 1\n",
        )
        .unwrap();

        assert_eq!(
            desc.spheres,
            vec![
                SphereDesc::new(Vector::new(1.0, 0.0, 0.0), 0.5),
                SphereDesc::new(Vector::new(-1.0, 0.5, 2.0), 0.25),
            ]
        );
        assert_eq!(desc.struts, vec![[0, 1]]);
    }

    #[test]
    fn malformed_records_report_their_line() {
        let err = parse_chassis("v 1 0 0 0.5\nv 1 0 0\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 2, .. }));

        let err = parse_chassis("v 1 0 0 0.5 7\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 1, .. }));

        let err = parse_chassis("c 0 -1\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 1, .. }));

        let err = parse_chassis("v 0 0 0 1\nv nan 0 0 1\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 2, .. }));

        let err = parse_chassis("\n\nw 1 2\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnknownRecord { line: 3, ref keyword } if keyword == "w"
        ));
    }
}
