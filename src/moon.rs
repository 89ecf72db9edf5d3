use monthpick::CalendarDate;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub(crate) enum Phase {
    Normal,
    Full,
    New,
}

impl Phase {
    // NetHack's phase of the moon, reduced to the two phases it reacts to
    pub(crate) fn for_date(date: CalendarDate) -> Phase {
        let date = date.as_date();
        // Will give wrong results pre-1900
        let year = date.year().abs_diff(1900);
        let goldn = (year % 19) + 1;
        let mut epact = (11 * goldn + 18) % 30;
        if (epact == 25 && goldn > 11) || epact == 24 {
            epact += 1;
        }
        let day0 = u32::from(date.ordinal() - 1);
        match (((((day0 + epact) * 6) + 11) % 177) / 22) & 7 {
            0 => Phase::New,
            4 => Phase::Full,
            _ => Phase::Normal,
        }
    }

    pub(crate) fn is_notable(self) -> bool {
        self != Phase::Normal
    }
}
