//! Static page content: the sections the nav bar links to.
//!
//! The sections form one scrollable document. Each section renders as a
//! title line, its body lines, and one blank separator line; the line math
//! here must stay in sync with the rendering in `ui.rs`.

/// Lines kept visible above a section after a nav jump, so the title
/// lands clear of the nav bar.
pub const NAV_OFFSET: u16 = 2;

/// How far below the top of the viewport the scroll-spy reference point
/// sits when deciding which section is "in view".
pub const SPY_MARGIN: u16 = 3;

pub struct Section {
    pub title: &'static str,
    pub lines: &'static [&'static str],
}

impl Section {
    pub fn height(&self) -> u16 {
        // title + body + trailing blank line
        self.lines.len() as u16 + 2
    }
}

pub fn sections() -> &'static [Section] {
    SECTIONS
}

/// Index of the Console section, the target of `focus_command_input`.
pub fn console_index() -> usize {
    SECTIONS.len() - 1
}

/// First document line of each section.
pub fn section_starts() -> Vec<u16> {
    let mut starts = Vec::with_capacity(SECTIONS.len());
    let mut line = 0u16;
    for section in SECTIONS {
        starts.push(line);
        line += section.height();
    }
    starts
}

pub fn total_lines() -> u16 {
    SECTIONS.iter().map(Section::height).sum()
}

/// Which section contains the given document line. Lines past the end
/// belong to the last section.
pub fn section_at(line: u16) -> usize {
    let starts = section_starts();
    let mut active = 0;
    for (idx, start) in starts.iter().enumerate() {
        if *start <= line {
            active = idx;
        }
    }
    active
}

static SECTIONS: &[Section] = &[
    Section {
        title: "Home",
        lines: &[
            "Vex — your personal assistant, one command away.",
            "",
            "Ask for an app, a website, a fact, or a song. Vex listens,",
            "figures it out, and replies right here in the console.",
        ],
    },
    Section {
        title: "About",
        lines: &[
            "Vex pairs this console with a local assistant server. The",
            "server interprets what you type, runs the action on your",
            "machine, and sends back a short reply. Nothing leaves your",
            "computer unless a command explicitly asks for the web.",
        ],
    },
    Section {
        title: "Features",
        lines: &[
            "* Open applications and websites by name",
            "* Wikipedia summaries for quick lookups",
            "* Chat with a local AI model",
            "* Play music from your library",
            "* Time, date, jokes, and the occasional surprise",
        ],
    },
    Section {
        title: "Console",
        lines: &[
            "Type a command below and press Enter. Try \"what time is it\",",
            "\"open youtube\", or \"wikipedia rust language\".",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_are_contiguous() {
        let starts = section_starts();
        assert_eq!(starts[0], 0);
        for (idx, window) in starts.windows(2).enumerate() {
            assert_eq!(window[1] - window[0], sections()[idx].height());
        }
        assert_eq!(
            total_lines(),
            starts.last().unwrap() + sections().last().unwrap().height()
        );
    }

    #[test]
    fn section_at_respects_bounds() {
        let starts = section_starts();
        assert_eq!(section_at(0), 0);
        assert_eq!(section_at(starts[1]), 1);
        assert_eq!(section_at(starts[1] - 1), 0);
        assert_eq!(section_at(total_lines() + 100), sections().len() - 1);
    }

    #[test]
    fn console_is_last() {
        assert_eq!(sections()[console_index()].title, "Console");
    }
}
