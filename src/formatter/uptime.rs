/// sysUpTime (сотые доли секунды) в "<d>d <h>h <m>m <s>s"
pub fn format_uptime(ticks: u64) -> String {
    let mut seconds = ticks / 100;
    let days = seconds / 86_400;
    seconds %= 86_400;
    let hours = seconds / 3_600;
    seconds %= 3_600;
    let minutes = seconds / 60;
    seconds %= 60;

    format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_whole_day() {
        assert_eq!(format_uptime(8_640_000), "1d 0h 0m 0s");
    }

    #[test]
    fn drops_centiseconds() {
        // 1d 2h 3m 4s + 99 сотых
        let ticks = ((86_400 + 2 * 3_600 + 3 * 60 + 4) * 100) + 99;
        assert_eq!(format_uptime(ticks), "1d 2h 3m 4s");
    }

    #[test]
    fn zero_uptime() {
        assert_eq!(format_uptime(0), "0d 0h 0m 0s");
    }
}
