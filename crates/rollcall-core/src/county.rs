//! The canonical county (jurisdiction partition) enumeration.
//!
//! Order is fixed and is the order in which partitions are processed and
//! reported. It is never re-sorted at runtime.

use serde::Serialize;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct County {
  pub code: &'static str,
  pub name: &'static str,
}

impl County {
  /// Artifact name stem: `{code}_{NAME}` with spaces replaced by `_`.
  pub fn slug(&self) -> String {
    format!("{}_{}", self.code, self.name.replace(' ', "_"))
  }
}

const fn c(code: &'static str, name: &'static str) -> County { County { code, name } }

pub const COUNTIES: &[County] = &[
  c("01", "AITKIN"),        c("02", "ANOKA"),         c("03", "BECKER"),
  c("04", "BELTRAMI"),      c("05", "BENTON"),        c("06", "BIG STONE"),
  c("07", "BLUE EARTH"),    c("08", "BROWN"),         c("09", "CARLTON"),
  c("10", "CARVER"),        c("11", "CASS"),          c("12", "CHIPPEWA"),
  c("13", "CHISAGO"),       c("14", "CLAY"),          c("15", "CLEARWATER"),
  c("16", "COOK"),          c("17", "COTTONWOOD"),    c("18", "CROW WING"),
  c("19", "DAKOTA"),        c("20", "DODGE"),         c("21", "DOUGLAS"),
  c("22", "FARIBAULT"),     c("23", "FILLMORE"),      c("24", "FREEBORN"),
  c("25", "GOODHUE"),       c("26", "GRANT"),         c("27", "HENNEPIN"),
  c("28", "HOUSTON"),       c("29", "HUBBARD"),       c("30", "ISANTI"),
  c("31", "ITASCA"),        c("32", "JACKSON"),       c("33", "KANABEC"),
  c("34", "KANDIYOHI"),     c("35", "KITTSON"),       c("36", "KOOCHICHING"),
  c("37", "LAC QUI PARLE"), c("38", "LAKE"),          c("39", "LAKE OF THE WOODS"),
  c("40", "LE SUEUR"),      c("41", "LINCOLN"),       c("42", "LYON"),
  c("43", "MCLEOD"),        c("44", "MAHNOMEN"),      c("45", "MARSHALL"),
  c("46", "MARTIN"),        c("47", "MEEKER"),        c("48", "MILLE LACS"),
  c("49", "MORRISON"),      c("50", "MOWER"),         c("51", "MURRAY"),
  c("52", "NICOLLET"),      c("53", "NOBLES"),        c("54", "NORMAN"),
  c("55", "OLMSTED"),       c("56", "OTTER TAIL"),    c("57", "PENNINGTON"),
  c("58", "PINE"),          c("59", "PIPESTONE"),     c("60", "POLK"),
  c("61", "POPE"),          c("62", "RAMSEY"),        c("63", "RED LAKE"),
  c("64", "REDWOOD"),       c("65", "RENVILLE"),      c("66", "RICE"),
  c("67", "ROCK"),          c("68", "ROSEAU"),        c("69", "ST. LOUIS"),
  c("70", "SCOTT"),         c("71", "SHERBURNE"),     c("72", "SIBLEY"),
  c("73", "STEARNS"),       c("74", "STEELE"),        c("75", "STEVENS"),
  c("76", "SWIFT"),         c("77", "TODD"),          c("78", "TRAVERSE"),
  c("79", "WABASHA"),       c("80", "WADENA"),        c("81", "WASECA"),
  c("82", "WASHINGTON"),    c("83", "WATONWAN"),      c("84", "WILKIN"),
  c("85", "WINONA"),        c("86", "WRIGHT"),        c("87", "YELLOW MEDICINE"),
];

/// Look a county up by its two-digit code.
pub fn by_code(code: &str) -> Result<County> {
  COUNTIES
    .iter()
    .find(|c| c.code == code)
    .copied()
    .ok_or_else(|| Error::UnknownCounty(code.to_owned()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn enumeration_is_complete_and_in_code_order() {
    assert_eq!(COUNTIES.len(), 87);
    for (idx, county) in COUNTIES.iter().enumerate() {
      assert_eq!(county.code, format!("{:02}", idx + 1));
    }
  }

  #[test]
  fn slug_replaces_spaces() {
    let county = by_code("39").unwrap();
    assert_eq!(county.slug(), "39_LAKE_OF_THE_WOODS");
    assert_eq!(by_code("69").unwrap().slug(), "69_ST._LOUIS");
  }

  #[test]
  fn unknown_code_is_an_error() {
    assert!(matches!(by_code("88"), Err(Error::UnknownCounty(code)) if code == "88"));
  }
}
