use crate::year_month::YearMonth;

/// An iterator over consecutive months from the start month through the
/// end month (inclusive).
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct MonthRange {
    next: Option<YearMonth>,
    end: YearMonth,
}

impl MonthRange {
    pub fn new(start: YearMonth, end: YearMonth) -> MonthRange {
        MonthRange {
            next: Some(start),
            end,
        }
    }
}

impl Iterator for MonthRange {
    type Item = YearMonth;
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|month| *month <= self.end)?;
        self.next = current.succ();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::MonthRange;
    use crate::year_month::YearMonth;

    #[test]
    fn test_month_range_iteration() {
        let start = YearMonth::new(2019, 11).unwrap();
        let end = YearMonth::new(2020, 2).unwrap();
        let months: Vec<String> = MonthRange::new(start, end).map(|m| m.to_string()).collect();
        assert_eq!(months, vec!["2019-11", "2019-12", "2020-01", "2020-02"]);
    }

    #[test]
    fn test_month_range_single_month() {
        let start = YearMonth::new(2022, 3).unwrap();
        let months: Vec<YearMonth> = MonthRange::new(start, start).collect();
        assert_eq!(months, vec![start]);
    }

    #[test]
    fn test_month_range_empty() {
        let start = YearMonth::new(2022, 3).unwrap();
        let end = YearMonth::new(2022, 2).unwrap();
        assert_eq!(MonthRange::new(start, end).count(), 0);
    }
}
