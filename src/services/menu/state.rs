//! Состояние одной интерактивной сессии меню.
//!
//! Полный список кандидатов фиксируется при создании и больше не меняется;
//! меняется только отфильтрованное представление. `filtered` хранит индексы
//! исходного списка, поэтому выбор всегда отображается в исходный индекс.

/// Итог сессии меню
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Выбрана строка с этим индексом исходного списка
    Chosen(usize),
    /// Совпадений не выбрано, введённый текст передаётся вызывающему
    FreeText(String),
    Aborted,
}

#[derive(Debug)]
pub struct MenuState {
    lines: Vec<String>,
    lines_lower: Vec<String>,
    rows: usize,
    filtered: Vec<usize>,
    selected: usize,
}

impl MenuState {
    /// `max_rows` - ёмкость видимого списка, `selected` - начальный выбор
    pub fn new(lines: Vec<String>, max_rows: usize, selected: usize) -> Self {
        let rows = max_rows.min(lines.len());
        let lines_lower = lines.iter().map(|line| fold_case(line)).collect();
        let filtered: Vec<usize> = (0..rows).collect();
        let selected = selected.min(filtered.len().saturating_sub(1));

        Self {
            lines,
            lines_lower,
            rows,
            filtered,
            selected,
        }
    }

    /// Пересчитать отфильтрованный список для запроса.
    ///
    /// Кандидаты проверяются в исходном порядке, совпадение - вхождение
    /// подстроки без учёта регистра; просмотр прекращается, когда заполнены
    /// все видимые строки.
    pub fn apply_query(&mut self, query: &str) {
        let needle = fold_case(query);
        let rows = self.rows;

        self.filtered = self
            .lines_lower
            .iter()
            .enumerate()
            .filter(|(_, line)| line.contains(needle.as_str()))
            .map(|(index, _)| index)
            .take(rows)
            .collect();

        self.selected = self.selected.min(self.filtered.len().saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        self.selected = if self.selected + 1 < self.filtered.len() {
            self.selected + 1
        } else {
            0
        };
    }

    pub fn select_previous(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        self.selected = if self.selected > 0 {
            self.selected - 1
        } else {
            self.filtered.len() - 1
        };
    }

    /// Исходный индекс выбранной строки, если она существует
    pub fn chosen(&self) -> Option<usize> {
        self.filtered.get(self.selected).copied()
    }

    /// Позиция выбора в отфильтрованном списке; None при пустом списке
    pub fn selected(&self) -> Option<usize> {
        (!self.filtered.is_empty()).then_some(self.selected)
    }

    #[cfg(test)]
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Число видимых строк (ёмкость списка в этой сессии)
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Видимые строки, дополненные пустыми до ёмкости
    pub fn visible_rows(&self) -> Vec<Option<&str>> {
        (0..self.rows)
            .map(|row| {
                self.filtered
                    .get(row)
                    .map(|&index| self.lines[index].as_str())
            })
            .collect()
    }
}

/// Посимвольное приведение к нижнему регистру, без контекстных правил
/// `str::to_lowercase` (финальная сигма)
fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn visible(state: &MenuState) -> Vec<&str> {
        state.visible_rows().into_iter().flatten().collect()
    }

    #[test]
    fn test_empty_query_keeps_original_order_truncated() {
        let mut state = MenuState::new(lines(&["a", "b", "c", "d"]), 3, 0);
        assert_eq!(visible(&state), vec!["a", "b", "c"]);

        state.apply_query("x");
        state.apply_query("");
        assert_eq!(visible(&state), vec!["a", "b", "c"]);
        assert_eq!(state.rows(), 3);
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let mut state = MenuState::new(
            lines(&["Firefox  Web Browser", "Terminal  bash", "Firefox  Settings"]),
            10,
            0,
        );

        state.apply_query("FIRE");
        assert_eq!(visible(&state), vec!["Firefox  Web Browser", "Firefox  Settings"]);
        for line in visible(&state) {
            assert!(line.to_lowercase().contains("fire"));
        }

        state.apply_query("bash");
        assert_eq!(visible(&state), vec!["Terminal  bash"]);

        state.apply_query("f s");
        assert!(visible(&state).is_empty());
    }

    #[test]
    fn test_filter_matches_non_ascii_titles() {
        let mut state = MenuState::new(lines(&["Firefox  ΟΔΟΣ", "XTerm  Файлы"]), 10, 0);

        state.apply_query("Σ");
        assert_eq!(state.visible_rows(), vec![Some("Firefox  ΟΔΟΣ"), None]);

        state.apply_query("οδ");
        assert_eq!(visible(&state), vec!["Firefox  ΟΔΟΣ"]);

        state.apply_query("ФАЙЛ");
        assert_eq!(visible(&state), vec!["XTerm  Файлы"]);
    }

    #[test]
    fn test_filter_stops_at_row_capacity() {
        let mut state = MenuState::new(lines(&["aa", "ab", "ba", "ca", "da"]), 2, 0);
        state.apply_query("a");
        assert_eq!(visible(&state), vec!["aa", "ab"]);
        assert_eq!(state.visible_rows().len(), 2);
    }

    #[test]
    fn test_visible_rows_padded_with_placeholders() {
        let mut state = MenuState::new(lines(&["one", "two", "three"]), 3, 0);
        state.apply_query("t");
        assert_eq!(state.visible_rows(), vec![Some("two"), Some("three"), None]);
    }

    #[test]
    fn test_chosen_returns_original_index() {
        let mut state = MenuState::new(lines(&["alpha", "bravo", "camera"]), 10, 0);
        state.apply_query("a");
        // "bravo" тоже содержит 'a'
        assert_eq!(visible(&state), vec!["alpha", "bravo", "camera"]);

        state.apply_query("am");
        assert_eq!(visible(&state), vec!["camera"]);
        assert_eq!(state.chosen(), Some(2));
    }

    #[test]
    fn test_chosen_maps_filtered_position_to_original() {
        let mut state = MenuState::new(lines(&["alpha", "delta", "camera"]), 10, 0);
        state.apply_query("a");
        state.apply_query("al");
        assert_eq!(visible(&state), vec!["alpha"]);

        state.apply_query("");
        state.apply_query("m");
        assert_eq!(visible(&state), vec!["camera"]);
        assert_eq!(state.chosen(), Some(2));

        let mut state = MenuState::new(lines(&["alpha", "xyz", "camera"]), 10, 0);
        state.apply_query("a");
        assert_eq!(visible(&state), vec!["alpha", "camera"]);
        state.select_next();
        assert_eq!(state.selected(), Some(1));
        assert_eq!(state.chosen(), Some(2));
    }

    #[test]
    fn test_navigation_wraps_around() {
        let mut state = MenuState::new(lines(&["a", "b", "c"]), 10, 0);

        state.select_previous();
        assert_eq!(state.selected(), Some(2));
        state.select_next();
        assert_eq!(state.selected(), Some(0));
        state.select_next();
        state.select_next();
        assert_eq!(state.selected(), Some(2));
        state.select_next();
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn test_navigation_on_empty_list_is_noop() {
        let mut state = MenuState::new(lines(&["a", "b"]), 10, 1);
        state.apply_query("zzz");

        state.select_next();
        state.select_previous();
        assert_eq!(state.selected(), None);
        assert_eq!(state.chosen(), None);
        assert_eq!(state.filtered_len(), 0);
    }

    #[test]
    fn test_selection_clamped_after_filter() {
        let mut state = MenuState::new(lines(&["xa", "xb", "xc", "yd"]), 10, 3);
        assert_eq!(state.selected(), Some(3));

        state.apply_query("x");
        assert_eq!(state.selected(), Some(2));

        state.apply_query("xa");
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn test_initial_selection_clamped() {
        let state = MenuState::new(lines(&["a", "b"]), 10, 5);
        assert_eq!(state.selected(), Some(1));

        let state = MenuState::new(Vec::new(), 10, 1);
        assert_eq!(state.selected(), None);
        assert_eq!(state.rows(), 0);
        assert!(state.lines().is_empty());
    }
}
