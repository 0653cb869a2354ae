// src/common/calendar.rs
//
// Relógio/calendário do negócio. Toda conta de "hoje", dia da semana e
// prazo passa por aqui, sempre no fuso configurado (por padrão -03:00,
// America/Sao_Paulo, que não observa horário de verão).

use chrono::{DateTime, Datelike, Duration, FixedOffset, Utc};

use crate::models::onboarding::DiaSemana;

// Fuso padrão do negócio: America/Sao_Paulo (UTC-3, sem horário de verão).
pub const DEFAULT_TZ_OFFSET: &str = "-03:00";

#[derive(Debug, Clone, Copy)]
pub struct Calendar {
    offset: FixedOffset,
}

impl Calendar {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    // Lê BUSINESS_TZ_OFFSET (formato "-03:00"); cai no padrão se ausente.
    pub fn from_env() -> anyhow::Result<Self> {
        let raw = std::env::var("BUSINESS_TZ_OFFSET").unwrap_or_else(|_| DEFAULT_TZ_OFFSET.into());
        let offset = parse_offset(&raw)?;
        Ok(Self::new(offset))
    }

    pub fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    // Dia da semana do instante, no fuso do negócio.
    pub fn dia_da_semana(&self, instant: DateTime<Utc>) -> DiaSemana {
        instant.with_timezone(&self.offset).weekday().into()
    }

    // Prazo de uma tarefa: agora + N dias.
    pub fn due_date(&self, now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
        now + Duration::days(days)
    }

    // Horas inteiras decorridas (truncado, não arredondado).
    pub fn elapsed_hours(since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        (now - since).num_hours()
    }

    // Dias inteiros decorridos (truncado, não arredondado).
    pub fn elapsed_days(since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        (now - since).num_days()
    }
}

// Converte "-03:00" / "+05:30" em FixedOffset.
fn parse_offset(raw: &str) -> anyhow::Result<FixedOffset> {
    let raw = raw.trim();
    let (sign, rest) = match raw.split_at_checked(1) {
        Some(("-", rest)) => (-1i32, rest),
        Some(("+", rest)) => (1i32, rest),
        _ => anyhow::bail!("Fuso inválido: '{raw}' (esperado formato '-03:00')"),
    };
    let (hh, mm) = rest
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("Fuso inválido: '{raw}' (esperado formato '-03:00')"))?;
    let hours: i32 = hh.parse()?;
    let minutes: i32 = mm.parse()?;
    let seconds = sign * (hours * 3600 + minutes * 60);
    FixedOffset::east_opt(seconds)
        .ok_or_else(|| anyhow::anyhow!("Fuso fora do intervalo: '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sao_paulo() -> Calendar {
        Calendar::new(parse_offset("-03:00").unwrap())
    }

    #[test]
    fn weekday_in_business_timezone_january() {
        // 2025-01-01 (quarta-feira) ao meio-dia UTC.
        let cal = sao_paulo();
        let instant = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(cal.dia_da_semana(instant), DiaSemana::Quarta);
    }

    #[test]
    fn weekday_in_business_timezone_july() {
        // 2025-07-01 (terça-feira). O fuso configurado não tem horário de
        // verão, então janeiro e julho usam o mesmo deslocamento.
        let cal = sao_paulo();
        let instant = Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap();
        assert_eq!(cal.dia_da_semana(instant), DiaSemana::Terca);
    }

    #[test]
    fn weekday_crosses_local_midnight() {
        // 01:00 UTC de 2025-01-01 ainda é 22:00 de 2024-12-31 (terça) em SP.
        let cal = sao_paulo();
        let instant = Utc.with_ymd_and_hms(2025, 1, 1, 1, 0, 0).unwrap();
        assert_eq!(cal.dia_da_semana(instant), DiaSemana::Terca);
    }

    #[test]
    fn elapsed_hours_truncates_down() {
        let since = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 11, 7, 59, 0).unwrap();
        assert_eq!(Calendar::elapsed_hours(since, now), 23);

        let now = Utc.with_ymd_and_hms(2025, 3, 11, 8, 0, 0).unwrap();
        assert_eq!(Calendar::elapsed_hours(since, now), 24);
    }

    #[test]
    fn elapsed_days_truncates_down() {
        let since = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 7, 59, 0).unwrap();
        assert_eq!(Calendar::elapsed_days(since, now), 4);

        let now = Utc.with_ymd_and_hms(2025, 3, 15, 8, 0, 0).unwrap();
        assert_eq!(Calendar::elapsed_days(since, now), 5);
    }

    #[test]
    fn due_date_adds_whole_days() {
        let cal = sao_paulo();
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
        let due = cal.due_date(now, 2);
        assert_eq!(due, Utc.with_ymd_and_hms(2025, 3, 12, 8, 0, 0).unwrap());
    }

    #[test]
    fn parse_offset_rejects_garbage() {
        assert!(parse_offset("sao_paulo").is_err());
        assert!(parse_offset("03:00").is_err());
        assert!(parse_offset("+05:30").is_ok());
    }
}
