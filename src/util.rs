// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;
use std::convert::TryFrom;
use std::os::unix::io::AsRawFd;
use ansi_term::ANSIString;

pub fn maybe_color(s: &ANSIString, emit_color: bool) -> String {
    match emit_color {
        true  => s.to_string(),
        false => (**s).to_string(), // deref once to get ANSIString, once more to get underlying str
    }
}

#[derive(PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone, Debug)]
pub enum Direction {
    Across,
    Down,
}
impl fmt::Display for Direction {
    fn fmt(&self,
           f: &mut fmt::Formatter) -> fmt::Result
    {
        write!(f, "{}", match self {
            Direction::Across => "across",
            Direction::Down   => "down",
        })
    }
}
impl TryFrom<&str> for Direction {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "across" => Ok(Direction::Across),
            "down"   => Ok(Direction::Down),
            _        => Err("Not a valid Direction value")
        }
    }
}

pub fn is_a_tty<T: AsRawFd>(handle: T) -> bool {
    let fd = handle.as_raw_fd();
    unsafe { libc::isatty(fd) != 0 }
}
