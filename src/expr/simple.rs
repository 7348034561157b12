use smol_str::SmolStr;

use crate::{
    Bind, Error, Operand, parse,
    operator::{Arity, Operator},
    writer::Fragment,
};

#[derive(Debug, Clone, PartialEq)]
pub struct SimpleCondition {
    column_name: SmolStr,
    operator: Operator,
    values: Vec<Operand>,
}

impl SimpleCondition {
    pub(crate) fn new(column_name: SmolStr, operator: Operator, values: Vec<Operand>) -> Self {
        Self {
            column_name,
            operator,
            values,
        }
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn values(&self) -> &[Operand] {
        &self.values
    }

    pub fn parameterize(&self) -> Result<Fragment, Error> {
        let column = parse::column(&self.column_name).map_err(|err| {
            err.context(format!("failed to parse column data of {:?}", self.column_name.as_str()))
        })?;

        let mut fragment = Fragment::new();
        fragment.write(&column)?;
        fragment.push_str(" ");
        fragment.write(&self.operator)?;

        match (self.operator.arity(), self.values.as_slice()) {
            (Arity::None, []) => {}
            (Arity::One, [value]) => {
                fragment.push_str(" ");
                write_operand(&mut fragment, value)?;
            }
            (Arity::Two, [low, high]) => {
                fragment.push_str(" ");
                write_operand(&mut fragment, low)?;
                fragment.push_str(" AND ");
                write_operand(&mut fragment, high)?;
            }
            (Arity::List, values) => {
                let mut list = Vec::with_capacity(values.len());
                for value in values {
                    match value {
                        Operand::Value(bind) => list.push(bind.clone()),
                        Operand::Column(_) => {
                            return Err(Error::ColumnValueInListContext {
                                column: self.column_name.clone(),
                            });
                        }
                    }
                }
                // the whole list occupies one placeholder
                fragment.push_str(" ");
                fragment.bind(Bind::List(list));
            }
            (arity, values) => {
                return Err(Error::OperandCount {
                    operator: self.operator.as_str(),
                    expected: match arity {
                        Arity::None => 0,
                        Arity::Two => 2,
                        Arity::One | Arity::List => 1,
                    },
                    found: values.len(),
                });
            }
        }

        Ok(fragment)
    }
}

fn write_operand(fragment: &mut Fragment, operand: &Operand) -> Result<(), Error> {
    match operand {
        Operand::Value(bind) => fragment.bind(bind.clone()),
        Operand::Column(value) => {
            let column = parse::column(value.column_name()).map_err(|err| {
                err.context(format!("failed to parse column value {:?}", value.column_name()))
            })?;
            fragment.write(&column)?;
        }
    }
    Ok(())
}
