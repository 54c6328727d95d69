//! Commonly used carrier codes.
//!
//! Codes are opaque to the client and passed through unchanged, so carriers
//! missing from this table still work.

/// A known carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carrier {
    pub code: &'static str,
    pub name: &'static str,
}

pub mod codes {
    pub const SHUN_FENG: &str = "SF";
    pub const BAI_SHI: &str = "HTKY";
    pub const ZHONG_TONG: &str = "ZTO";
    pub const SHEN_TONG: &str = "STO";
    pub const YUAN_TONG: &str = "YTO";
    pub const YUN_DA: &str = "YD";
    pub const YOU_ZHENG: &str = "YZPY";
    pub const EMS: &str = "EMS";
    pub const TIAN_TIAN: &str = "HHTT";
    pub const YOU_SU: &str = "UC";
    pub const DE_BANG: &str = "DBL";
    pub const JING_DONG: &str = "JD";
    pub const ZHAI_JI_SONG: &str = "ZJS";
}

pub const CARRIERS: &[Carrier] = &[
    Carrier {
        code: codes::SHUN_FENG,
        name: "顺丰速运",
    },
    Carrier {
        code: codes::BAI_SHI,
        name: "百世快递",
    },
    Carrier {
        code: codes::ZHONG_TONG,
        name: "中通快递",
    },
    Carrier {
        code: codes::SHEN_TONG,
        name: "申通快递",
    },
    Carrier {
        code: codes::YUAN_TONG,
        name: "圆通速递",
    },
    Carrier {
        code: codes::YUN_DA,
        name: "韵达速递",
    },
    Carrier {
        code: codes::YOU_ZHENG,
        name: "邮政快递包裹",
    },
    Carrier {
        code: codes::EMS,
        name: "EMS",
    },
    Carrier {
        code: codes::TIAN_TIAN,
        name: "天天快递",
    },
    Carrier {
        code: codes::YOU_SU,
        name: "优速快递",
    },
    Carrier {
        code: codes::DE_BANG,
        name: "德邦快递",
    },
    Carrier {
        code: codes::JING_DONG,
        name: "京东快递",
    },
    Carrier {
        code: codes::ZHAI_JI_SONG,
        name: "宅急送",
    },
];

/// Look up a carrier by its exact code.
#[must_use]
pub fn find(code: &str) -> Option<&'static Carrier> {
    CARRIERS.iter().find(|carrier| carrier.code == code)
}
