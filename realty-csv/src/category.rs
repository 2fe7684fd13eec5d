//! Output table categories, one per contract kind.

use std::fmt;

use chrono::NaiveDateTime;

/// Format of the run timestamp embedded in output file names.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H-%M-%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Sale,
    Lease,
    Mortgage,
    SharedConstruction,
}

impl Category {
    /// All categories, in the order a batch is written.
    pub const ALL: [Category; 4] = [
        Category::Sale,
        Category::Lease,
        Category::Mortgage,
        Category::SharedConstruction,
    ];

    /// Position in [`Category::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Title used as the output file name prefix.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Sale => "Сделки на основании договоров купли-продажи",
            Category::Lease => "Сделки на основании договоров аренды",
            Category::Mortgage => "Сделки на основании договоров ипотеки",
            Category::SharedConstruction => {
                "Сделки на основании договора участия в долевом строительстве"
            }
        }
    }

    /// Column titles of the header row.
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Category::Sale => &[
                "Вид зарегистрированного права",
                "Дата государственной регистрации права",
                "Дата выдачи (подписания) документа-основания",
                "Цена сделки по договору",
                "Кадастровый номер",
                "Цена по договору",
                "Доля. Числитель",
                "Доля. Знаменатель",
                "Цена доли в праве по договору",
                "Размер приобретаемой(-ых) доли(-ей)",
            ],
            Category::Lease => &[
                "Вид зарегистрированного ограничения права",
                "Дата государственной регистрации сделки",
                "Дата выдачи (подписания) документа-основания",
                "Арендная плата (Цена сделки)",
                "Дата начала аренды",
                "Дата конца аренды",
                "Продолжительность аренды",
                "Кадастровый номер",
            ],
            Category::Mortgage => &[
                "Вид зарегистрированного ограничения права",
                "Дата государственной регистрации ипотеки",
                "Дата выдачи (подписания) документа-основания",
                "Дата возникновения ипотеки в соответствии с договором об ипотеке",
                "Дата исполнения обязательства, обеспеченного залогом в соответствии с договором об ипотеке",
                "Оценка предмета ипотеки",
                "Кадастровый номер",
            ],
            Category::SharedConstruction => &[
                "Вид сделки",
                "Дата государственной регистрации договора",
                "Дата выдачи (подписания) документа-основания",
                "Предмет сделки",
                "Цена, определенная договором",
                "Кадастровый номер",
            ],
        }
    }

    /// Output file name for a run started at `timestamp`.
    pub fn file_name(&self, timestamp: NaiveDateTime) -> String {
        format!(
            "{} {}.csv",
            self.label(),
            timestamp.format(TIMESTAMP_FORMAT)
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Sale => "sale",
            Category::Lease => "lease",
            Category::Mortgage => "mortgage",
            Category::SharedConstruction => "shared_construction",
        })
    }
}
