//! Closed node-type vocabulary of the Solidity parser AST
//!
//! Group membership (statement, expression, literal, ...) is plain set
//! membership over [`NodeType`]. A node can belong to several groups at once:
//! a `NumberLiteral` is both a literal and a primary expression.

use std::fmt;

macro_rules! node_types {
    ($($variant:ident),* $(,)?) => {
        /// Every `type` tag the parser can emit
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NodeType {
            $($variant),*
        }

        impl NodeType {
            /// All node types in declaration order
            pub const ALL: &'static [NodeType] = &[$(NodeType::$variant),*];

            /// The parser's tag for this node type
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(NodeType::$variant => stringify!($variant)),*
                }
            }

            /// Resolve a parser tag; `None` for tags outside the vocabulary
            pub fn from_tag(tag: &str) -> Option<Self> {
                match tag {
                    $(stringify!($variant) => Some(NodeType::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

node_types! {
    // Source unit + directives
    SourceUnit,
    PragmaDirective,
    ImportDirective,
    // Definitions
    ContractDefinition,
    InheritanceSpecifier,
    StateVariableDeclaration,
    FileLevelConstant,
    UsingForDeclaration,
    StructDefinition,
    ModifierDefinition,
    ModifierInvocation,
    FunctionDefinition,
    EventDefinition,
    CustomErrorDefinition,
    TypeDefinition,
    EnumValue,
    EnumDefinition,
    VariableDeclaration,
    // Type names
    ElementaryTypeName,
    UserDefinedTypeName,
    Mapping,
    ArrayTypeName,
    FunctionTypeName,
    // Statements
    Block,
    ExpressionStatement,
    IfStatement,
    UncheckedStatement,
    TryStatement,
    CatchClause,
    WhileStatement,
    ForStatement,
    InlineAssemblyStatement,
    DoWhileStatement,
    ContinueStatement,
    BreakStatement,
    ReturnStatement,
    EmitStatement,
    ThrowStatement,
    RevertStatement,
    VariableDeclarationStatement,
    // Expressions
    FunctionCall,
    NewExpression,
    TupleExpression,
    NameValueExpression,
    NameValueList,
    BinaryOperation,
    UnaryOperation,
    Conditional,
    IndexAccess,
    IndexRangeAccess,
    MemberAccess,
    Identifier,
    // Literals
    BooleanLiteral,
    NumberLiteral,
    HexLiteral,
    StringLiteral,
    HexNumber,
    DecimalNumber,
    // Inline assembly (Yul)
    AssemblyBlock,
    AssemblyCall,
    AssemblyLocalDefinition,
    AssemblyAssignment,
    AssemblyStackAssignment,
    AssemblySwitch,
    AssemblyCase,
    AssemblyFunctionDefinition,
    AssemblyFunctionReturns,
    AssemblyFor,
    AssemblyIf,
    AssemblyMemberAccess,
    LabelDefinition,
    SubAssembly,
    Break,
    Continue,
}

impl NodeType {
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            NodeType::Block
                | NodeType::ExpressionStatement
                | NodeType::IfStatement
                | NodeType::UncheckedStatement
                | NodeType::TryStatement
                | NodeType::WhileStatement
                | NodeType::ForStatement
                | NodeType::InlineAssemblyStatement
                | NodeType::DoWhileStatement
                | NodeType::ContinueStatement
                | NodeType::BreakStatement
                | NodeType::ReturnStatement
                | NodeType::EmitStatement
                | NodeType::ThrowStatement
                | NodeType::RevertStatement
                | NodeType::VariableDeclarationStatement
        )
    }

    pub fn is_expression(self) -> bool {
        self.is_primary_expression()
            || matches!(
                self,
                NodeType::FunctionCall
                    | NodeType::NewExpression
                    | NodeType::NameValueExpression
                    | NodeType::BinaryOperation
                    | NodeType::UnaryOperation
                    | NodeType::Conditional
                    | NodeType::IndexAccess
                    | NodeType::IndexRangeAccess
                    | NodeType::MemberAccess
            )
    }

    pub fn is_primary_expression(self) -> bool {
        self.is_literal()
            || matches!(
                self,
                NodeType::Identifier | NodeType::TupleExpression | NodeType::ElementaryTypeName
            )
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            NodeType::BooleanLiteral
                | NodeType::NumberLiteral
                | NodeType::HexLiteral
                | NodeType::StringLiteral
                | NodeType::HexNumber
                | NodeType::DecimalNumber
        )
    }

    pub fn is_loop(self) -> bool {
        matches!(
            self,
            NodeType::WhileStatement | NodeType::ForStatement | NodeType::DoWhileStatement
        )
    }

    pub fn is_definition(self) -> bool {
        matches!(
            self,
            NodeType::ContractDefinition
                | NodeType::StateVariableDeclaration
                | NodeType::FileLevelConstant
                | NodeType::StructDefinition
                | NodeType::ModifierDefinition
                | NodeType::FunctionDefinition
                | NodeType::EventDefinition
                | NodeType::CustomErrorDefinition
                | NodeType::TypeDefinition
                | NodeType::EnumDefinition
                | NodeType::VariableDeclaration
        )
    }

    pub fn is_type_name(self) -> bool {
        matches!(
            self,
            NodeType::ElementaryTypeName
                | NodeType::UserDefinedTypeName
                | NodeType::Mapping
                | NodeType::ArrayTypeName
                | NodeType::FunctionTypeName
        )
    }

    pub fn is_assembly(self) -> bool {
        matches!(
            self,
            NodeType::AssemblyBlock
                | NodeType::AssemblyCall
                | NodeType::AssemblyLocalDefinition
                | NodeType::AssemblyAssignment
                | NodeType::AssemblyStackAssignment
                | NodeType::AssemblySwitch
                | NodeType::AssemblyCase
                | NodeType::AssemblyFunctionDefinition
                | NodeType::AssemblyFunctionReturns
                | NodeType::AssemblyFor
                | NodeType::AssemblyIf
                | NodeType::AssemblyMemberAccess
                | NodeType::LabelDefinition
                | NodeType::SubAssembly
                | NodeType::Break
                | NodeType::Continue
        )
    }

    /// break / continue / return / throw / revert
    pub fn is_jump(self) -> bool {
        matches!(
            self,
            NodeType::BreakStatement | NodeType::ContinueStatement
        ) || self.is_terminal()
    }

    /// Statements that leave the function
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            NodeType::ReturnStatement | NodeType::ThrowStatement | NodeType::RevertStatement
        )
    }

    pub fn is_in(self, group: NodeGroup) -> bool {
        group.contains(self)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named node groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeGroup {
    Statement,
    Expression,
    PrimaryExpression,
    Literal,
    Loop,
    Definition,
    TypeName,
    Assembly,
    Jump,
    Terminal,
}

impl NodeGroup {
    pub fn contains(self, node_type: NodeType) -> bool {
        match self {
            NodeGroup::Statement => node_type.is_statement(),
            NodeGroup::Expression => node_type.is_expression(),
            NodeGroup::PrimaryExpression => node_type.is_primary_expression(),
            NodeGroup::Literal => node_type.is_literal(),
            NodeGroup::Loop => node_type.is_loop(),
            NodeGroup::Definition => node_type.is_definition(),
            NodeGroup::TypeName => node_type.is_type_name(),
            NodeGroup::Assembly => node_type.is_assembly(),
            NodeGroup::Jump => node_type.is_jump(),
            NodeGroup::Terminal => node_type.is_terminal(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeGroup::Statement => "Statement",
            NodeGroup::Expression => "Expression",
            NodeGroup::PrimaryExpression => "PrimaryExpression",
            NodeGroup::Literal => "Literal",
            NodeGroup::Loop => "Loop",
            NodeGroup::Definition => "Definition",
            NodeGroup::TypeName => "TypeName",
            NodeGroup::Assembly => "Assembly",
            NodeGroup::Jump => "Jump",
            NodeGroup::Terminal => "Terminal",
        }
    }
}
