//===========================================================================//

macro_rules! invalid_size {
    ($size:expr) => {
        return Err($crate::error::Error::InvalidSize($size as i64))
    };
}

macro_rules! render_error {
    ($e:expr) => {
        return Err($crate::error::Error::Render(($e).to_string()))
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::error::Error::Render(format!($fmt, $($arg)+)))
    };
}

macro_rules! invalid_png {
    ($e:expr) => {
        return Err($crate::error::Error::InvalidPng(($e).to_string()))
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::error::Error::InvalidPng(format!($fmt, $($arg)+)))
    };
}

//===========================================================================//
