/// FAQ list where opening one item closes the rest
#[derive(Debug, Clone, Default)]
pub struct Accordion {
    items: Vec<FaqItem>,
    open: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

impl FaqItem {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

impl Accordion {
    pub fn new(items: Vec<FaqItem>) -> Self {
        Self { items, open: None }
    }

    /// Toggle item `index`, closing every other item. Out-of-range indices
    /// are ignored. Returns whether `index` is open afterwards.
    pub fn toggle(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.open = if self.open == Some(index) { None } else { Some(index) };
        self.open == Some(index)
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    pub fn items(&self) -> &[FaqItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faq() -> Accordion {
        Accordion::new(vec![
            FaqItem::new("What is it?", "A landing page."),
            FaqItem::new("Does it need a GPU?", "No, there is a 2D fallback."),
            FaqItem::new("Can I turn motion off?", "Yes."),
        ])
    }

    #[test]
    fn opening_one_closes_the_others() {
        let mut faq = faq();
        assert!(faq.toggle(0));
        assert!(faq.toggle(2));
        assert!(!faq.is_open(0));
        assert!(faq.is_open(2));
    }

    #[test]
    fn toggling_open_item_closes_it() {
        let mut faq = faq();
        faq.toggle(1);
        assert!(!faq.toggle(1));
        assert_eq!(faq.open_index(), None);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut faq = faq();
        faq.toggle(1);
        assert!(!faq.toggle(7));
        assert_eq!(faq.open_index(), Some(1));
    }

    #[test]
    fn at_most_one_open_for_any_sequence() {
        let mut faq = faq();
        for index in [0, 0, 1, 2, 2, 5, 1, 0, 1, 1, 2] {
            faq.toggle(index);
            let open = (0..faq.len()).filter(|&i| faq.is_open(i)).count();
            assert!(open <= 1);
        }
    }
}
