//! Closed enumerations printed on the injection prescription.
//!
//! Each enumeration has two spellings:
//! - a stable snake_case serde name used in drafts and catalog files
//! - the printed label (`label()`), which is what the paper form shows

use serde::{Deserialize, Serialize};

/// Payment category for the visit (费别).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeType {
    /// 自费
    #[default]
    SelfPay,
    /// 新农合
    RuralCooperative,
    /// 医保
    Insurance,
    /// 保健对象
    CareSubject,
    /// 其他
    Other,
}

impl ChargeType {
    /// Every member, in the order the checkboxes are printed.
    pub const ALL: [ChargeType; 5] = [
        ChargeType::SelfPay,
        ChargeType::RuralCooperative,
        ChargeType::Insurance,
        ChargeType::CareSubject,
        ChargeType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChargeType::SelfPay => "自费",
            ChargeType::RuralCooperative => "新农合",
            ChargeType::Insurance => "医保",
            ChargeType::CareSubject => "保健对象",
            ChargeType::Other => "其他",
        }
    }
}

/// Patient gender as offered by the form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "男",
            Gender::Female => "女",
        }
    }
}

/// Skin-test / continuation marker on a medicine line.
///
/// The form's third option, "no skin test needed", is represented by the
/// absence of a marker (`Option<SkinTest>::None`) rather than a member here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinTest {
    /// 皮试
    Required,
    /// 续用
    Continuation,
}

impl SkinTest {
    pub fn label(self) -> &'static str {
        match self {
            SkinTest::Required => "皮试",
            SkinTest::Continuation => "续用",
        }
    }
}

/// Unit for the number of containers dispensed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerUnit {
    /// 瓶
    #[default]
    Bottle,
    /// 支
    Ampoule,
}

impl ContainerUnit {
    pub fn label(self) -> &'static str {
        match self {
            ContainerUnit::Bottle => "瓶",
            ContainerUnit::Ampoule => "支",
        }
    }
}

/// Route of administration for a dose group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdministrationWay {
    /// 静脉滴注
    #[default]
    IntravenousDrip,
    /// 肌肉注射
    Intramuscular,
    /// 皮下注射
    Subcutaneous,
}

impl AdministrationWay {
    pub fn label(self) -> &'static str {
        match self {
            AdministrationWay::IntravenousDrip => "静脉滴注",
            AdministrationWay::Intramuscular => "肌肉注射",
            AdministrationWay::Subcutaneous => "皮下注射",
        }
    }
}

/// Dosing frequency code. The printed label is the Latin abbreviation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// qd
    #[default]
    OnceDaily,
    /// bid
    TwiceDaily,
    /// tid
    ThreeTimesDaily,
    /// qid
    FourTimesDaily,
}

impl Frequency {
    pub fn label(self) -> &'static str {
        match self {
            Frequency::OnceDaily => "qd",
            Frequency::TwiceDaily => "bid",
            Frequency::ThreeTimesDaily => "tid",
            Frequency::FourTimesDaily => "qid",
        }
    }
}

macro_rules! display_label {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.label())
                }
            }
        )+
    };
}

display_label!(ChargeType, Gender, SkinTest, ContainerUnit, AdministrationWay, Frequency);
