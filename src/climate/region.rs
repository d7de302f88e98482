//! Brazilian federative units and regional climate fallbacks

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::sample::SiteClimate;

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Region {
    North,
    Northeast,
    CentralWest,
    Southeast,
    South,
}

impl Region {
    /// Estimated regional averages of daily irradiance (kWh/m²/day) and
    /// 10 m wind speed (m/s).
    ///
    /// Coarse figures for when no measured series is available. They are
    /// not a substitute for site data.
    pub fn default_climate(self) -> SiteClimate {
        let (solar, wind) = match self {
            Region::North => (4.8, 3.2),
            Region::Northeast => (5.9, 6.5),
            Region::CentralWest => (5.6, 3.6),
            Region::Southeast => (5.3, 4.2),
            Region::South => (4.6, 5.4),
        };
        SiteClimate::new(solar, wind)
    }
}

/// One federative unit
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateInfo {
    pub uf: &'static str,
    pub ibge_code: u8,
    pub name: &'static str,
    pub region: Region,
}

const fn state(ibge_code: u8, uf: &'static str, name: &'static str, region: Region) -> StateInfo {
    StateInfo {
        uf,
        ibge_code,
        name,
        region,
    }
}

/// All 27 federative units, ordered by IBGE code
pub static STATES: [StateInfo; 27] = [
    state(11, "RO", "Rondônia", Region::North),
    state(12, "AC", "Acre", Region::North),
    state(13, "AM", "Amazonas", Region::North),
    state(14, "RR", "Roraima", Region::North),
    state(15, "PA", "Pará", Region::North),
    state(16, "AP", "Amapá", Region::North),
    state(17, "TO", "Tocantins", Region::North),
    state(21, "MA", "Maranhão", Region::Northeast),
    state(22, "PI", "Piauí", Region::Northeast),
    state(23, "CE", "Ceará", Region::Northeast),
    state(24, "RN", "Rio Grande do Norte", Region::Northeast),
    state(25, "PB", "Paraíba", Region::Northeast),
    state(26, "PE", "Pernambuco", Region::Northeast),
    state(27, "AL", "Alagoas", Region::Northeast),
    state(28, "SE", "Sergipe", Region::Northeast),
    state(29, "BA", "Bahia", Region::Northeast),
    state(31, "MG", "Minas Gerais", Region::Southeast),
    state(32, "ES", "Espírito Santo", Region::Southeast),
    state(33, "RJ", "Rio de Janeiro", Region::Southeast),
    state(35, "SP", "São Paulo", Region::Southeast),
    state(41, "PR", "Paraná", Region::South),
    state(42, "SC", "Santa Catarina", Region::South),
    state(43, "RS", "Rio Grande do Sul", Region::South),
    state(50, "MS", "Mato Grosso do Sul", Region::CentralWest),
    state(51, "MT", "Mato Grosso", Region::CentralWest),
    state(52, "GO", "Goiás", Region::CentralWest),
    state(53, "DF", "Distrito Federal", Region::CentralWest),
];

/// Look up a unit by its two-letter abbreviation, ignoring case.
pub fn lookup_uf(uf: &str) -> Option<&'static StateInfo> {
    let uf = uf.trim();
    STATES.iter().find(|s| s.uf.eq_ignore_ascii_case(uf))
}

/// Look up a unit by its IBGE code.
pub fn lookup_ibge(code: u8) -> Option<&'static StateInfo> {
    STATES.iter().find(|s| s.ibge_code == code)
}

/// Units belonging to one region
pub fn states_in(region: Region) -> impl Iterator<Item = &'static StateInfo> {
    STATES.iter().filter(move |s| s.region == region)
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[rstest]
    #[case("BA", 29, Region::Northeast)]
    #[case("sp", 35, Region::Southeast)]
    #[case(" rs ", 43, Region::South)]
    #[case("DF", 53, Region::CentralWest)]
    #[case("am", 13, Region::North)]
    fn test_lookup_uf(#[case] uf: &str, #[case] code: u8, #[case] region: Region) {
        let info = lookup_uf(uf).unwrap();
        assert_eq!(info.ibge_code, code);
        assert_eq!(info.region, region);
        assert_eq!(lookup_ibge(code), Some(info));
    }

    #[test]
    fn test_unknown_uf() {
        assert!(lookup_uf("XX").is_none());
        assert!(lookup_uf("").is_none());
        assert!(lookup_ibge(34).is_none());
    }

    #[test]
    fn test_table_is_unique() {
        assert!(STATES.iter().map(|s| s.uf).all_unique());
        assert!(STATES.iter().map(|s| s.ibge_code).all_unique());
    }

    #[test]
    fn test_region_membership() {
        let counts: Vec<usize> = Region::iter().map(|r| states_in(r).count()).collect();
        // North, Northeast, Central-West, Southeast, South
        assert_eq!(counts, vec![7, 9, 4, 4, 3]);
    }

    #[test]
    fn test_default_climates_are_valid() {
        for region in Region::iter() {
            let climate = region.default_climate();
            assert!(climate.validate().is_ok(), "{region}");
            assert!(climate.solar_irradiance_kwh_m2_day > 0.0);
        }
    }

    #[test]
    fn test_region_parses() {
        assert_eq!("central_west".parse::<Region>().unwrap(), Region::CentralWest);
        assert_eq!(Region::Northeast.to_string(), "northeast");
    }
}
