use crate::block::*;
use crate::document::Document;

/// Visitor pattern for traversing the block tree immutably
///
/// Default implementations walk the whole tree. Override specific visit_*
/// methods to act on nodes.
pub trait Visitor: Sized {
    fn visit_document(&mut self, doc: &Document) {
        walk_document(self, doc);
    }

    fn visit_block(&mut self, block: &Block) {
        walk_block(self, block);
    }

    fn visit_leaf(&mut self, _id: &str, _content: &LeafContent) {
        // Leaf node, no children to walk
    }

    fn visit_columns(&mut self, _id: &str, columns: &ColumnsContent) {
        walk_columns(self, columns);
    }

    fn visit_column(&mut self, column: &Column) {
        walk_column(self, column);
    }

    fn visit_nested_block(&mut self, block: &LeafBlock) {
        self.visit_leaf(&block.id, &block.content);
    }
}

/// Mutable visitor for transforming the block tree in place
pub trait VisitorMut: Sized {
    fn visit_document_mut(&mut self, doc: &mut Document) {
        walk_document_mut(self, doc);
    }

    fn visit_block_mut(&mut self, block: &mut Block) {
        walk_block_mut(self, block);
    }

    fn visit_columns_mut(&mut self, columns: &mut ColumnsContent) {
        walk_columns_mut(self, columns);
    }

    fn visit_column_mut(&mut self, column: &mut Column) {
        walk_column_mut(self, column);
    }

    fn visit_nested_block_mut(&mut self, _block: &mut LeafBlock) {
        // Leaf node, no children to walk
    }
}

pub fn walk_document<V: Visitor>(visitor: &mut V, doc: &Document) {
    for block in &doc.blocks {
        visitor.visit_block(block);
    }
}

pub fn walk_block<V: Visitor>(visitor: &mut V, block: &Block) {
    match &block.content {
        BlockContent::Leaf(leaf) => visitor.visit_leaf(&block.id, leaf),
        BlockContent::Columns(columns) => visitor.visit_columns(&block.id, columns),
    }
}

pub fn walk_columns<V: Visitor>(visitor: &mut V, columns: &ColumnsContent) {
    for column in &columns.columns {
        visitor.visit_column(column);
    }
}

pub fn walk_column<V: Visitor>(visitor: &mut V, column: &Column) {
    for block in &column.blocks {
        visitor.visit_nested_block(block);
    }
}

pub fn walk_document_mut<V: VisitorMut>(visitor: &mut V, doc: &mut Document) {
    for block in &mut doc.blocks {
        visitor.visit_block_mut(block);
    }
}

pub fn walk_block_mut<V: VisitorMut>(visitor: &mut V, block: &mut Block) {
    if let BlockContent::Columns(columns) = &mut block.content {
        visitor.visit_columns_mut(columns);
    }
}

pub fn walk_columns_mut<V: VisitorMut>(visitor: &mut V, columns: &mut ColumnsContent) {
    for column in &mut columns.columns {
        visitor.visit_column_mut(column);
    }
}

pub fn walk_column_mut<V: VisitorMut>(visitor: &mut V, column: &mut Column) {
    for block in &mut column.blocks {
        visitor.visit_nested_block_mut(block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{create_block_with, create_columns_block_with, create_leaf_block_with};
    use crate::IdGenerator;

    #[derive(Default)]
    struct TypeCounter {
        leaves: Vec<String>,
        columns: usize,
    }

    impl Visitor for TypeCounter {
        fn visit_leaf(&mut self, _id: &str, content: &LeafContent) {
            self.leaves.push(content_type(content));
        }

        fn visit_column(&mut self, column: &Column) {
            self.columns += 1;
            walk_column(self, column);
        }
    }

    fn content_type(content: &LeafContent) -> String {
        use crate::block::BlockBody;
        content.type_name().to_string()
    }

    #[test]
    fn test_visitor_reaches_nested_blocks() {
        let mut ids = IdGenerator::from_seed("t");
        let mut layout = create_columns_block_with(&mut ids, "50-50", None);
        let button = create_leaf_block_with(&mut ids, "button", None).unwrap();
        layout.as_columns_mut().unwrap().columns[1].blocks.push(button);

        let doc = Document::from_blocks(vec![
            create_block_with(&mut ids, "text", None).unwrap(),
            layout,
        ]);

        let mut counter = TypeCounter::default();
        counter.visit_document(&doc);

        assert_eq!(counter.leaves, vec!["text", "button"]);
        assert_eq!(counter.columns, 2);
    }
}
