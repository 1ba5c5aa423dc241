/// Request kinds as they appear in `requestCode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum RequestCode {
    Invalid = 0,
    Tweet = 1,
    Subscribe = 2,
    Unsubscribe = 3,
    Timeline = 4,
    Exit = 5,
    ValidateUser = 6,
}

/// Response kinds as they appear in `responseCode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ResponseCode {
    Invalid = 10,
    Tweet = 11,
    Subscribe = 12,
    Unsubscribe = 13,
    Timeline = 14,
    Exit = 15,
    ValidateUser = 16,
}

impl RequestCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Response kind answering this request kind.
    pub fn response(self) -> ResponseCode {
        match self {
            Self::Invalid => ResponseCode::Invalid,
            Self::Tweet => ResponseCode::Tweet,
            Self::Subscribe => ResponseCode::Subscribe,
            Self::Unsubscribe => ResponseCode::Unsubscribe,
            Self::Timeline => ResponseCode::Timeline,
            Self::Exit => ResponseCode::Exit,
            Self::ValidateUser => ResponseCode::ValidateUser,
        }
    }
}

impl TryFrom<i32> for RequestCode {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Invalid),
            1 => Ok(Self::Tweet),
            2 => Ok(Self::Subscribe),
            3 => Ok(Self::Unsubscribe),
            4 => Ok(Self::Timeline),
            5 => Ok(Self::Exit),
            6 => Ok(Self::ValidateUser),
            other => Err(other),
        }
    }
}

impl ResponseCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for ResponseCode {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(Self::Invalid),
            11 => Ok(Self::Tweet),
            12 => Ok(Self::Subscribe),
            13 => Ok(Self::Unsubscribe),
            14 => Ok(Self::Timeline),
            15 => Ok(Self::Exit),
            16 => Ok(Self::ValidateUser),
            other => Err(other),
        }
    }
}
